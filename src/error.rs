use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, KmlTrackError>;

#[derive(Debug)]
pub enum KmlTrackError {
    XmlParse(quick_xml::Error),
    InvalidCoordinate {
        value: String,
    },
    NoTrack,
    Fetch {
        url: String,
        reason: String,
    },
    HttpStatus {
        url: String,
        status: u16,
    },
    UnknownRoad(u32),
    SourceUnavailable(u32),
}

impl std::fmt::Display for KmlTrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::XmlParse(e) => write!(f, "XML parse error: {e}"),
            Self::InvalidCoordinate { value } => {
                write!(f, "Invalid coordinate tuple '{value}'")
            }
            Self::NoTrack => write!(f, "Document contains no line geometry"),
            Self::Fetch { url, reason } => write!(f, "Failed to fetch '{url}': {reason}"),
            Self::HttpStatus { url, status } => {
                write!(f, "HTTP {status} while fetching '{url}'")
            }
            Self::UnknownRoad(id) => write!(f, "Unknown road id {id}"),
            Self::SourceUnavailable(id) => write!(f, "Road {id} has no track file"),
        }
    }
}

impl std::error::Error for KmlTrackError {}

impl From<quick_xml::Error> for KmlTrackError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e)
    }
}

impl From<KmlTrackError> for JsValue {
    fn from(e: KmlTrackError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
