/// Flight-data widget endpoint, keyed by airport code and board type.
pub const DEFAULT_WIDGET_TEMPLATE: &str =
    "https://fids.flightradar.live/widgets/airport/{airport}/{type}";

const AIRPORT_PLACEHOLDER: &str = "{airport}";
const TYPE_PLACEHOLDER: &str = "{type}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    MissingPlaceholder(&'static str),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::MissingPlaceholder(p) => {
                write!(f, "widget url template is missing the {p} placeholder")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetUrlTemplate {
    template: String,
}

impl WidgetUrlTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let template = template.trim();
        if !template.contains(AIRPORT_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder(AIRPORT_PLACEHOLDER));
        }
        if !template.contains(TYPE_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder(TYPE_PLACEHOLDER));
        }
        Ok(Self {
            template: template.to_string(),
        })
    }

    pub fn render(&self, airport: &str, kind: &str) -> String {
        self.template
            .replace(AIRPORT_PLACEHOLDER, airport)
            .replace(TYPE_PLACEHOLDER, kind)
    }
}

impl Default for WidgetUrlTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_WIDGET_TEMPLATE.to_string(),
        }
    }
}

/// Configuration of one deferred container, read from its data attributes.
///
/// A container with a blank or absent attribute is `Missing`: it is kept so
/// indices stay stable, but it never loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedSource {
    /// `data-src` on a `.lazy-load-container`.
    Frame { url: String },
    /// `data-airport` + `data-type` on a `.lazy-load-widget`.
    Widget { airport: String, kind: String },
    Missing,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EmbedSource {
    pub fn frame(src: Option<String>) -> Self {
        match non_blank(src) {
            Some(url) => EmbedSource::Frame { url },
            None => EmbedSource::Missing,
        }
    }

    pub fn widget(airport: Option<String>, kind: Option<String>) -> Self {
        match (non_blank(airport), non_blank(kind)) {
            (Some(airport), Some(kind)) => EmbedSource::Widget { airport, kind },
            _ => EmbedSource::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, EmbedSource::Missing)
    }
}
