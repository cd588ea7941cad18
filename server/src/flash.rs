//! One-shot user-visible messages carried across a redirect.
//!
//! The message rides the redirect itself as query parameters (`flash`,
//! `kind`), so the receiving page can render it without any session state.

use axum::response::Redirect;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Redirect to `path` with this message appended as query parameters.
    pub fn redirect_to(&self, path: &str) -> Redirect {
        Redirect::to(&format!("{path}?{}", self.query()))
    }

    fn query(&self) -> String {
        serde_urlencoded::to_string(vec![
            ("flash", self.message.as_str()),
            ("kind", self.kind.as_str()),
        ])
        .unwrap_or_default()
    }
}

/// Query-side counterpart of [`Flash`]: pages that are redirect targets
/// accept these parameters and surface the message once.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub flash: Option<String>,
    pub kind: Option<FlashKind>,
}

impl FlashParams {
    pub fn into_flash(self) -> Option<Flash> {
        self.flash.map(|message| Flash {
            kind: self.kind.unwrap_or(FlashKind::Success),
            message,
        })
    }

    /// Template-ready `(message, kind)` pair; an empty message means there
    /// is nothing to show.
    pub fn into_fields(self) -> (String, String) {
        match self.into_flash() {
            Some(flash) => {
                let kind = flash.kind.as_str().to_string();
                (flash.message, kind)
            }
            None => (String::new(), String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_encodes_message_and_kind() {
        let flash = Flash::error("Recipe not found");
        assert_eq!(flash.query(), "flash=Recipe+not+found&kind=error");
    }

    #[test]
    fn params_round_trip() {
        let params: FlashParams =
            serde_urlencoded::from_str("flash=Recipe+added+successfully%21&kind=success")
                .expect("parse failed");
        let flash = params.into_flash().expect("no flash");
        assert_eq!(flash.message, "Recipe added successfully!");
        assert_eq!(flash.kind, FlashKind::Success);
    }

    #[test]
    fn missing_kind_defaults_to_success() {
        let params = FlashParams {
            flash: Some("done".to_string()),
            kind: None,
        };
        assert_eq!(params.into_flash(), Some(Flash::success("done")));
    }

    #[test]
    fn no_message_means_no_flash() {
        let params = FlashParams::default();
        assert_eq!(params.into_flash(), None);
    }
}
