/// Marker on a user story or backlog task indicating association with an
/// open sprint. The only meaningful value on the wire is `"sprint"`; absence
/// is represented as `None` on the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Sprint,
}

impl Badge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::Sprint => "sprint",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sprint" => Some(Badge::Sprint),
            _ => None,
        }
    }
}
