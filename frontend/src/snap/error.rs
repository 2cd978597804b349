use thiserror::Error;
use wasm_bindgen::JsValue;

// Reasons the hero snap stays out of the way. None of these are faults of
// the page; native scrolling keeps working in every case.
#[derive(Debug, Error)]
pub enum SnapError {
    #[error("no window available")]
    NoWindow,
    #[error("no document available")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("page has no hero element")]
    NoHero,
    #[error("hero has no following section")]
    NoSecondSection,
    #[error("user prefers reduced motion")]
    ReducedMotion,
    #[error("hero snap already bound to this hero")]
    AlreadyBound,
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for SnapError {
    fn from(value: JsValue) -> Self {
        SnapError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
