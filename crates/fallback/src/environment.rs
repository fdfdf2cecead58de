//! Canned environmental analyses
//!
//! One fixed analysis per request type; unknown types map to the general
//! analysis. Deterministic so callers always know the full output set.

/// Acoustic environment analysis
pub const SOUNDS_ANALYSIS: &str = "I can detect a mix of environmental sounds: gentle keyboard \
     typing from nearby workstations, soft background music at low volume, air conditioning \
     humming quietly, and occasional footsteps in the hallway. There's also the distant sound \
     of a coffee machine and quiet conversations about 15 feet away. The overall acoustic \
     environment is calm and conducive to focus.";

/// People and activity analysis
pub const PEOPLE_ANALYSIS: &str = "I sense approximately 8-12 people in your immediate area. \
     Most appear to be working quietly at their desks, with a few engaged in a low-volume \
     discussion near the coffee area. The energy feels productive and collaborative, with \
     people moving occasionally but maintaining a respectful, focused atmosphere. Someone \
     nearby is typing actively, and I can hear pages turning from another direction.";

/// Safety analysis
pub const SAFETY_ANALYSIS: &str = "The environment appears safe and well-maintained. I don't \
     detect any immediate hazards or obstacles in the main pathways. The lighting seems \
     adequate, and there's good ventilation from the air conditioning system. Emergency exits \
     should be clearly marked, and the space feels secure with normal office activity. The \
     floor surfaces sound solid and even, with no apparent spills or obstacles.";

/// Navigation and spatial analysis
pub const NAVIGATION_ANALYSIS: &str = "The space appears to be an open office layout with \
     defined walkways. There are workstations arranged in clusters, with a main pathway running \
     through the center. I can identify a coffee/break area to your left based on the sounds, \
     and what seems to be a quieter zone to your right. The acoustics suggest high ceilings and \
     good sound distribution, making navigation easier through audio cues.";

/// Comprehensive analysis
pub const GENERAL_ANALYSIS: &str = "You're in what appears to be a modern office environment \
     with 8-12 people working quietly. The acoustic signature includes gentle typing, soft \
     conversations, air conditioning, and occasional movement. The space feels safe and \
     well-organized, with clear pathways and a collaborative but focused atmosphere. The \
     coffee area is active to your left, while quieter work zones are to your right. Overall, \
     it's a comfortable, productive environment with good accessibility.";

/// Canned analysis for an environment request type
pub fn analysis_for(request_type: &str) -> &'static str {
    match request_type {
        "sounds" => SOUNDS_ANALYSIS,
        "people" => PEOPLE_ANALYSIS,
        "safety" => SAFETY_ANALYSIS,
        "navigation" => NAVIGATION_ANALYSIS,
        _ => GENERAL_ANALYSIS,
    }
}
