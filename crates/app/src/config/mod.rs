#[derive(Debug, Clone, Default)]
pub struct RangeParams {
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}
