use std::fmt::Display;

/// pedestrian crossing classes derived from the OSM `crossing` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingType {
    Signalled,
    Marked,
    Unmarked,
}

impl CrossingType {
    pub const ALL: [CrossingType; 3] = [
        CrossingType::Signalled,
        CrossingType::Marked,
        CrossingType::Unmarked,
    ];

    const SIGNALLED_TAGS: [&'static str; 6] = [
        "traffic_signals",
        "signals",
        "pedestrian_signals",
        "controlled",
        "traffic_signals;marked",
        "pelican",
    ];

    const MARKED_TAGS: [&'static str; 5] = [
        "uncontrolled",
        "marked",
        "zebra",
        "uncontrolled;marked",
        "pelican",
    ];

    /// classifies a crossing tag. the marked list is checked last so it takes
    /// precedence for tags found in both lists ("pelican").
    pub fn from_tag(tag: Option<&str>) -> CrossingType {
        let mut result = CrossingType::Unmarked;
        if let Some(t) = tag {
            if CrossingType::SIGNALLED_TAGS.contains(&t) {
                result = CrossingType::Signalled;
            }
            if CrossingType::MARKED_TAGS.contains(&t) {
                result = CrossingType::Marked;
            }
        }
        result
    }

    /// name of the one-hot column for this class on the road network table
    pub fn column_name(&self) -> &'static str {
        match self {
            CrossingType::Signalled => "signalled_crossing",
            CrossingType::Marked => "marked_crossing",
            CrossingType::Unmarked => "unmarked_crossing",
        }
    }
}

impl Display for CrossingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
