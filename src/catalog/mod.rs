//! Read-only advice catalog.
//!
//! A static library of wellness tips, reflective check-in prompts and
//! affirmations. Random selections take a caller-provided [`Rng`] so the
//! scheduler can drive them from a seeded generator in tests.

mod tips;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use tips::{
    AFFIRMATIONS, CHECK_IN_PROMPTS, CRISIS_RESOURCES, PROFESSIONAL_RESOURCES, TIPS, TipSeed,
};

/// Topic a tip addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TipCategory {
    Stress,
    Anxiety,
    Mood,
    Sleep,
    Productivity,
    SelfCare,
    Mindfulness,
}

impl TipCategory {
    /// Every category, in catalog order.
    pub const ALL: [TipCategory; 7] = [
        Self::Stress,
        Self::Anxiety,
        Self::Mood,
        Self::Sleep,
        Self::Productivity,
        Self::SelfCare,
        Self::Mindfulness,
    ];
}

impl std::fmt::Display for TipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Stress => "stress",
            Self::Anxiety => "anxiety",
            Self::Mood => "mood",
            Self::Sleep => "sleep",
            Self::Productivity => "productivity",
            Self::SelfCare => "self-care",
            Self::Mindfulness => "mindfulness",
        };
        f.write_str(name)
    }
}

/// How pressing the situation a tip targets is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One wellness tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalHealthTip {
    pub id: String,
    pub category: TipCategory,
    pub title: String,
    pub advice: String,
    /// Concrete steps, rendered as a bullet list.
    pub actionable: Vec<String>,
    pub severity: Severity,
}

impl TipSeed {
    fn to_tip(&self) -> MentalHealthTip {
        MentalHealthTip {
            id: self.id.to_owned(),
            category: self.category,
            title: self.title.to_owned(),
            advice: self.advice.to_owned(),
            actionable: self.actionable.iter().map(|s| (*s).to_owned()).collect(),
            severity: self.severity,
        }
    }
}

/// Mood tag used to personalize a tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    General,
    Stressed,
    Anxious,
    Sad,
    Overwhelmed,
    Tired,
}

impl Mood {
    /// Moods the scheduler samples from when generating periodic advice.
    pub const SCHEDULED: [Mood; 5] = [
        Self::General,
        Self::Stressed,
        Self::Anxious,
        Self::Overwhelmed,
        Self::Tired,
    ];

    /// Catalog category that serves this mood.
    pub fn category(self) -> TipCategory {
        match self {
            Self::Stressed => TipCategory::Stress,
            Self::Anxious => TipCategory::Anxiety,
            Self::Sad => TipCategory::Mood,
            Self::Overwhelmed => TipCategory::Productivity,
            Self::Tired => TipCategory::SelfCare,
            Self::General => TipCategory::Mindfulness,
        }
    }

    /// Opening line shown above the tip.
    pub fn personal_message(self) -> &'static str {
        match self {
            Self::Stressed => {
                "I understand you're feeling stressed right now. Here's something that might help:"
            }
            Self::Anxious => {
                "Anxiety can feel overwhelming, but you have tools to manage it. Try this:"
            }
            Self::Sad => {
                "It's okay to feel sad sometimes. Here's a gentle way to support yourself:"
            }
            Self::Overwhelmed => "When everything feels like too much, breaking it down can help:",
            Self::Tired => "Your energy is important. Here's how to take care of yourself:",
            Self::General => "Here's a mindful practice to support your well-being:",
        }
    }
}

/// A tip paired with its mood-specific opening line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalizedAdvice {
    pub tip: MentalHealthTip,
    pub personal_message: String,
}

/// A titled group of support resources.
#[derive(Debug, Clone, Copy)]
pub struct ResourceGroup {
    pub title: &'static str,
    pub message: &'static str,
    pub resources: &'static [&'static str],
}

/// Crisis and professional-help resources.
#[derive(Debug, Clone, Copy)]
pub struct EmergencyResources {
    pub crisis: ResourceGroup,
    pub professional: ResourceGroup,
}

/// Random tip from `category`, `None` when the category has no tips.
pub fn tip_by_category<R: Rng + ?Sized>(
    category: TipCategory,
    rng: &mut R,
) -> Option<MentalHealthTip> {
    let matching: Vec<&TipSeed> = TIPS.iter().filter(|t| t.category == category).collect();
    matching.choose(rng).map(|seed| seed.to_tip())
}

/// Uniformly random tip from the whole catalog.
pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> MentalHealthTip {
    let index = rng.gen_range(0..TIPS.len());
    TIPS[index].to_tip()
}

/// All tips with the given severity.
pub fn tips_by_severity(severity: Severity) -> Vec<MentalHealthTip> {
    TIPS.iter()
        .filter(|t| t.severity == severity)
        .map(TipSeed::to_tip)
        .collect()
}

/// All categories the catalog knows about.
pub fn available_categories() -> &'static [TipCategory] {
    &TipCategory::ALL
}

/// Up to `count` distinct tips in random order.
pub fn multiple_tips<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<MentalHealthTip> {
    TIPS.choose_multiple(rng, count.min(TIPS.len()))
        .map(TipSeed::to_tip)
        .collect()
}

/// Tip for `mood`, falling back to any tip when its category is empty.
pub fn personalized_advice<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> PersonalizedAdvice {
    let tip = match tip_by_category(mood.category(), rng) {
        Some(tip) => tip,
        None => random_tip(rng),
    };
    PersonalizedAdvice {
        tip,
        personal_message: mood.personal_message().to_owned(),
    }
}

/// Reflective questions attached to scheduled advice.
pub fn check_in_prompts() -> &'static [&'static str] {
    CHECK_IN_PROMPTS
}

/// Encouraging one-liners attached to scheduled advice.
pub fn affirmations() -> &'static [&'static str] {
    AFFIRMATIONS
}

pub fn emergency_resources() -> EmergencyResources {
    EmergencyResources {
        crisis: ResourceGroup {
            title: "If you're in crisis",
            message: "Please reach out for immediate help. You don't have to go through this alone.",
            resources: CRISIS_RESOURCES,
        },
        professional: ResourceGroup {
            title: "Consider Professional Help",
            message: "These feelings persist or significantly impact your daily life",
            resources: PROFESSIONAL_RESOURCES,
        },
    }
}

/// Render a tip as markdown-ish text for display.
pub fn format_tip_for_display(tip: &MentalHealthTip) -> String {
    let action_items = bullet_list(&tip.actionable);
    format!(
        "**{}**\n\n{}\n\n**What you can do:**\n{}\n\nRemember: Small steps lead to big changes. Be patient and kind with yourself.",
        tip.title, tip.advice, action_items
    )
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
