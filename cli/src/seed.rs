use anyhow::{bail, Context, Result};
use reqwest::redirect::Policy;
use reqwest::Client;

struct SeedRecipe {
    name: &'static str,
    instructions: &'static str,
    prep_time_minutes: Option<u32>,
    cost_estimate: Option<f64>,
    /// (rating, comment) posted after the recipe is created.
    review: Option<(u8, &'static str)>,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        name: "Classic Spaghetti Carbonara",
        instructions: "1. Bring a large pot of salted water to boil and cook spaghetti until al dente.
2. While pasta cooks, cut pancetta into small cubes and fry until crispy.
3. Whisk together eggs, grated Pecorino Romano, and black pepper.
4. Reserve a cup of pasta water, drain, and add hot pasta to the pancetta pan off heat.
5. Pour the egg mixture over the pasta and toss vigorously to make a creamy sauce.
6. Loosen with pasta water as needed and serve with extra cheese.",
        prep_time_minutes: Some(30),
        cost_estimate: Some(8.50),
        review: Some((5, "Perfect balance of rich and salty. The pasta-water trick works.")),
    },
    SeedRecipe {
        name: "Chicken Tikka Masala",
        instructions: "1. Marinate chicken in yogurt, garam masala, cumin, and salt for two hours.
2. Grill the chicken until charred and cooked through.
3. Saute onions until golden, then add garlic and ginger.
4. Add tomato puree, cream, and spices; simmer for 15 minutes.
5. Fold in the chicken and simmer 10 minutes more.
6. Garnish with cilantro and serve with rice or naan.",
        prep_time_minutes: Some(45),
        cost_estimate: Some(11.00),
        review: Some((4, "Great sauce, needed a bit more heat for my taste.")),
    },
    SeedRecipe {
        name: "Banana Bread",
        instructions: "1. Preheat oven to 350F and grease a loaf pan.
2. Mash bananas until smooth, then mix in melted butter, sugar, egg, and vanilla.
3. Stir in baking soda and salt, then fold in flour until just combined.
4. Bake 55-65 minutes until a toothpick comes out clean.
5. Cool in the pan for ten minutes before turning out.",
        prep_time_minutes: Some(75),
        cost_estimate: Some(4.25),
        review: None,
    },
    SeedRecipe {
        name: "Thai Green Curry",
        instructions: "1. Fry green curry paste in oil until fragrant.
2. Add coconut milk and bring to a simmer.
3. Add vegetables and protein; cook until just tender.
4. Season with fish sauce and a pinch of sugar.
5. Finish with Thai basil and serve over jasmine rice.",
        prep_time_minutes: Some(35),
        cost_estimate: Some(9.75),
        review: Some((5, "Weeknight staple. Double the basil.")),
    },
    SeedRecipe {
        name: "Overnight Oats",
        instructions: "1. Combine oats, milk, yogurt, and chia seeds in a jar.
2. Sweeten with honey or maple syrup.
3. Refrigerate overnight.
4. Top with fruit and nuts before serving.",
        prep_time_minutes: Some(10),
        cost_estimate: Some(2.50),
        review: None,
    },
];

/// Seeds a running server with sample recipes (and reviews for some of
/// them) through its public form endpoints.
pub async fn seed(server: &str) -> Result<()> {
    // Redirects are not followed; the Location header of the creation
    // response carries the new recipe's detail path.
    let client = Client::builder().redirect(Policy::none()).build()?;

    for recipe in SAMPLE_RECIPES {
        let recipe_id = create_recipe(&client, server, recipe).await?;
        if let Some((rating, comment)) = recipe.review {
            create_review(&client, server, recipe_id, rating, comment).await?;
        }
        println!("Seeded recipe {recipe_id}: {}", recipe.name);
    }

    println!("Seeded {} recipes", SAMPLE_RECIPES.len());
    Ok(())
}

async fn create_recipe(client: &Client, server: &str, recipe: &SeedRecipe) -> Result<i64> {
    let mut form = vec![
        ("name".to_string(), recipe.name.to_string()),
        ("instructions".to_string(), recipe.instructions.to_string()),
    ];
    if let Some(prep) = recipe.prep_time_minutes {
        form.push(("prep_time".to_string(), prep.to_string()));
    }
    if let Some(cost) = recipe.cost_estimate {
        form.push(("cost_estimate".to_string(), cost.to_string()));
    }

    let response = client
        .post(format!("{server}/add_recipe"))
        .form(&form)
        .send()
        .await
        .with_context(|| format!("failed to submit recipe {:?}", recipe.name))?;

    if !response.status().is_redirection() {
        bail!(
            "unexpected status {} creating recipe {:?}",
            response.status(),
            recipe.name
        );
    }

    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .context("redirect without a Location header")?;

    parse_recipe_id(location)
        .with_context(|| format!("could not find a recipe id in {location:?}"))
}

async fn create_review(
    client: &Client,
    server: &str,
    recipe_id: i64,
    rating: u8,
    comment: &str,
) -> Result<()> {
    let form = [
        ("rating".to_string(), rating.to_string()),
        ("comment".to_string(), comment.to_string()),
    ];

    let response = client
        .post(format!("{server}/add_review/{recipe_id}"))
        .form(&form)
        .send()
        .await
        .with_context(|| format!("failed to submit review for recipe {recipe_id}"))?;

    if !response.status().is_redirection() {
        bail!(
            "unexpected status {} reviewing recipe {recipe_id}",
            response.status()
        );
    }

    Ok(())
}

/// Extracts the id from a detail-page redirect like `/recipe/7?flash=...`.
fn parse_recipe_id(location: &str) -> Option<i64> {
    location
        .strip_prefix("/recipe/")?
        .split('?')
        .next()?
        .parse()
        .ok()
}
