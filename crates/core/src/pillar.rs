//! The fixed list of readiness pillars.

/// Number of pillars in an assessment.
pub const PILLAR_COUNT: usize = 19;

/// The readiness pillars, in the order they are asked.
pub const PILLARS: [&str; PILLAR_COUNT] = [
    "Personal Readiness",
    "Financial Readiness",
    "Business Idea Validation",
    "Legal & Structural Setup",
    "Operations & Logistics",
    "Marketing & Sales Strategy",
    "Mindset & Philosophy",
    "First 30 Days Execution Plan",
    "Psychographic Analysis",
    "Footfall / Traffic Analysis",
    "Competition Analysis",
    "Distribution & Fulfillment",
    "Team & Outsourcing",
    "Tech & Automation Stack",
    "Branding & Storytelling",
    "Traction & Feedback Loops",
    "Exit or Pivot Strategy",
    "Skill–Scope Fit Assessment",
    "Field Exposure / Apprenticeship",
];

/// Look up a pillar by 0-based index.
pub fn pillar_at(index: usize) -> Option<&'static str> {
    PILLARS.get(index).copied()
}

/// Whether `name` is one of the known pillars.
pub fn is_pillar(name: &str) -> bool {
    PILLARS.contains(&name)
}
