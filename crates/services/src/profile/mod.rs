use serde::Serialize;

/// The traveller the app is built around. Read-only seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub visited: Vec<String>,
    pub interests: Vec<String>,
}

impl Profile {
    pub fn seed() -> Self {
        Self {
            name: "Arpita".to_string(),
            visited: ["Manali", "Goa", "Bali"].map(String::from).to_vec(),
            interests: ["Culture", "Food", "Adventure"].map(String::from).to_vec(),
        }
    }

    pub fn visited_summary(&self) -> String {
        self.visited.join(", ")
    }

    pub fn interests_summary(&self) -> String {
        self.interests.join(", ")
    }
}

/// A next-destination idea inspired by a past trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JourneySuggestion {
    pub id: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub blurb: &'static str,
    /// Ready-made planning prompt sent to the chat
    pub prompt: &'static str,
}

static JOURNEY_SUGGESTIONS: [JourneySuggestion; 3] = [
    JourneySuggestion {
        id: "darjeeling",
        from: "Manali",
        to: "Darjeeling",
        blurb: "Crisp hill-station mornings, tea gardens, and scenic toy-train rides. A perfect September escape.",
        prompt: "Suggest a 3-day Darjeeling trip this September with top activities and price ranges.",
    },
    JourneySuggestion {
        id: "pondicherry",
        from: "Goa",
        to: "Pondicherry",
        blurb: "Laid-back beaches, French-colonial charm, and coastal cafés. A mellow December getaway idea.",
        prompt: "Suggest a 3-day Pondicherry plan for December with food highlights and price ranges.",
    },
    JourneySuggestion {
        id: "phuket",
        from: "Bali",
        to: "Phuket",
        blurb: "Sunset beaches, island hopping, and lively night markets. A tropical switch for your next summer.",
        prompt: "Suggest top beach activities in Phuket this summer with estimated prices.",
    },
];

pub fn journey_suggestions() -> &'static [JourneySuggestion] {
    &JOURNEY_SUGGESTIONS
}

pub fn find_suggestion(id: &str) -> Option<&'static JourneySuggestion> {
    JOURNEY_SUGGESTIONS
        .iter()
        .find(|s| s.id.eq_ignore_ascii_case(id))
}
