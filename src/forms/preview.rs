use serde::Deserialize;

/// Raw URL submitted by the preview form; the resolver accepts arbitrary
/// strings, so no validation happens here.
#[derive(Deserialize)]
pub struct PreviewForm {
    pub url: String,
}
