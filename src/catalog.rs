use serde::Serialize;

use crate::error::{KmlTrackError, Result};
use crate::source::TrackSource;

/// One pilgrimage road as listed on the site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Road {
    pub id: u32,
    pub name: &'static str,
    /// Towns the road passes, `" / "` separated.
    pub short_description: &'static str,
    pub km: u32,
    pub destination: &'static str,
    pub is_loop: bool,
    /// KML track path relative to the site root.
    pub track: Option<&'static str>,
    /// Printable PDF guide path relative to the site root.
    pub guide: Option<&'static str>,
}

impl Road {
    pub fn track_source(&self) -> Result<TrackSource> {
        self.track
            .map(|path| TrackSource::Url(path.to_string()))
            .ok_or(KmlTrackError::SourceUnavailable(self.id))
    }
}

const fn road(
    id: u32,
    name: &'static str,
    short_description: &'static str,
    km: u32,
    destination: &'static str,
    is_loop: bool,
    track: &'static str,
    guide: &'static str,
) -> Road {
    Road {
        id,
        name,
        short_description,
        km,
        destination,
        is_loop,
        track: Some(track),
        guide: Some(guide),
    }
}

static ROADS: [Road; 16] = [
    road(1, "Św. Macieja", "Andrychów / Wieprz / Radocza / Wysoka / Kalwaria", 42, "Kalwaria", false, "roads/1.kml", "roads/1.pdf"),
    road(2, "Zielona", "Andrychów / Zagórnik / Łękawica / Kalwaria", 32, "Kalwaria", false, "roads/2.kml", "roads/2.pdf"),
    road(3, "Św. Franciszka", "Andrychów / Targoszów / Ślemień / Rychwałd", 38, "Rychwałd", false, "roads/3.kml", "roads/3.pdf"),
    road(4, "JP II", "Andrychów / Zagórnik / Zembrzyce / Kalwaria", 46, "Kalwaria", false, "roads/4.kml", "roads/4.pdf"),
    road(5, "MB Różańcowej", "Andrychów / Wieprz / Wadowice / Andrychów", 43, "Andrychów", true, "roads/5.kml", "roads/5.pdf"),
    road(6, "Św. Faustyny", "Andrychów / Kaczyna / Wadowice / Andrychów", 43, "Andrychów", true, "roads/6.kml", "roads/6.pdf"),
    road(7, "Św. Józefa", "Andrychów / Roczyny / Zawadka / Wadowice", 31, "Wadowice", false, "roads/7.kml", "roads/7.pdf"),
    road(8, "Św. Stanisława", "Andrychów / Żar / Zagórnik / Andrychów", 50, "Andrychów", true, "roads/8.kml", "roads/8.pdf"),
    road(9, "Św. Klary", "Andrychów / Ślemień / Pewel Mała / Rychwałd", 46, "Rychwałd", false, "roads/9.kml", "roads/9.pdf"),
    road(10, "Wszystkich Świętych", "Andrychów / Bulowice / Frydrychowice / Andrychów", 52, "Andrychów", true, "roads/10.kml", "roads/10.pdf"),
    road(11, "Św. Krzysztof", "Andrychów / Zator / Piekary / Kraków", 82, "Kraków", false, "roads/11.kml", "roads/11.pdf"),
    road(12, "Św. Rafała", "Andrychów / Zagórnik / Kaczyna / Wadowice", 20, "Wadowice", false, "roads/12.kml", "roads/12.pdf"),
    road(13, "Św. Teresy", "Andrychów / Wieprz / Tomice / Wadowice", 23, "Wadowice", false, "roads/13.kml", "roads/13.pdf"),
    // Still being verified: no published track or guide yet.
    Road {
        id: 14,
        name: "Św. Alberta",
        short_description: "W trakcie weryfikacji",
        km: 0,
        destination: "Wadowice",
        is_loop: false,
        track: None,
        guide: None,
    },
    road(15, "Św. Urbana", "Roczyny / Żar / Kocierz / Roczyny", 39, "Roczyny", true, "roads/15.kml", "roads/15.pdf"),
    road(16, "Św. Pawła", "Roczyny / Malec / Kęty / Roczyny", 45, "Roczyny", true, "roads/16.kml", "roads/16.pdf"),
];

pub fn roads() -> &'static [Road] {
    &ROADS
}

pub fn find_road(id: u32) -> Option<&'static Road> {
    ROADS.iter().find(|r| r.id == id)
}
