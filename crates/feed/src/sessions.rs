#![forbid(unsafe_code)]

use forecast::domain::SessionKind;

/// Map an API session name to its category. Testing days and anything else
/// unrecognised yield `None`.
pub fn session_kind(name: &str) -> Option<SessionKind> {
    match name.trim() {
        "Practice 1" | "Practice 2" | "Practice 3" | "Practice" => Some(SessionKind::Practice),
        "Qualifying" => Some(SessionKind::Qualifying),
        "Sprint Qualifying" | "Sprint Shootout" => Some(SessionKind::SprintQualifying),
        "Sprint" => Some(SessionKind::Sprint),
        "Race" => Some(SessionKind::Race),
        _ => None,
    }
}
