//! Copywriting elements used to season generation prompts
//!
//! Process-wide read-only tables. Keyed phrase sets use `BTreeMap` so prompts
//! built from them are stable across runs.

use std::collections::{BTreeMap, HashMap};

use crate::entities::sea_orm_active_enums::Niche;

lazy_static::lazy_static! {
    pub static ref AUTHORITY_INTRODUCTIONS: BTreeMap<&'static str, &'static str> = BTreeMap::from([
        ("expert_credentials", "According to [Expert Name], a [Credentials] who has studied [Topic] for over [Years]..."),
        ("institution_contributor", "[Expert Name], a former contributor to [Institution], discovered that..."),
        ("leading_researcher", "Leading researcher [Expert Name] from [University/Institution] found that..."),
        ("helped_thousands", "[Expert Name], who has helped thousands of people with [Problem], revealed that..."),
    ]);

    pub static ref PROBLEM_AGITATION_PHRASES: BTreeMap<&'static str, &'static str> = BTreeMap::from([
        ("struggling_explanation", "If you've been struggling with [Problem], this might explain why..."),
        ("common_belief_prevents", "Most people don't realize that [Common Belief] actually prevents [Desired Outcome]..."),
        ("previous_solutions_failed", "The reason [Previous Solutions] haven't worked is because..."),
        ("real_issue_root_cause", "What if the real issue isn't [Surface Problem] but actually [Root Cause]..."),
    ]);

    pub static ref MECHANISM_INTRODUCTIONS: BTreeMap<&'static str, &'static str> = BTreeMap::from([
        ("scientific_discovery", "Recent research has uncovered a [Scientific Discovery] that may help..."),
        ("natural_process", "Scientists have identified a [Natural Process] that could support..."),
        ("breakthrough_method", "This breakthrough method works by [Simple Explanation]..."),
        ("mechanism_affects", "The key lies in understanding how [Mechanism] naturally affects [Result]..."),
    ]);

    pub static ref SOCIAL_PROOF_STATEMENTS: BTreeMap<&'static str, &'static str> = BTreeMap::from([
        ("thousands_explored", "Thousands of people have already explored this method..."),
        ("research_participants", "Research participants reported experiencing [Benefits]..."),
        ("users_discovering", "Users from around the world are discovering how [Method] may help..."),
        ("many_find_supports", "Many people find that this approach supports [Desired Outcome]..."),
    ]);

    pub static ref EDUCATIONAL_CTAS: BTreeMap<&'static str, &'static str> = BTreeMap::from([
        ("watch_presentation", "Click below to watch an educational presentation that explains..."),
        ("see_demonstration", "Tap the button to see a demonstration of how this works..."),
        ("learn_research", "Watch this short video to learn more about the research behind..."),
        ("discover_method", "Click here to discover how this method may help you..."),
    ]);

    pub static ref BENEFIT_FOCUSED_LANGUAGE: BTreeMap<&'static str, &'static str> = BTreeMap::from([
        ("may_help_support", "May help support [Benefit]"),
        ("could_contribute", "Could contribute to [Positive Outcome]"),
        ("useful_for", "Many people find this useful for [Application]"),
        ("research_suggests", "Research suggests this approach may [Benefit]"),
        ("users_report", "Users often report [Experience]"),
        ("designed_to_support", "This method is designed to support [Goal]"),
    ]);

    pub static ref COMPLIANCE_SAFE_TRANSITIONS: BTreeMap<&'static str, &'static str> = BTreeMap::from([
        ("according_to_research", "According to research..."),
        ("studies_suggest", "Studies suggest..."),
        ("many_users_report", "Many users report..."),
        ("experts_believe", "Experts believe..."),
        ("approach_designed", "This approach is designed to..."),
        ("people_often_find", "People often find..."),
    ]);

    static ref NICHE_HOOKS: HashMap<Niche, Vec<&'static str>> = HashMap::from([
        (Niche::Woodworking, vec![
            "Ever wondered how to create stunning [projects] without expensive tools?",
            "What if you could build professional-quality [items] even as a complete beginner?",
            "Struggling to find detailed plans that actually work?",
            "Most DIY projects fail because of this one missing element...",
        ]),
        (Niche::Manifestation, vec![
            "The real secret to [desired outcome] doesn't start with [common method]...",
            "What if there's a scientific reason why [popular technique] doesn't work for most people?",
            "Scientists studying [topic] uncovered something surprising...",
            "Before you try another [common solution], watch this...",
        ]),
        (Niche::Prepping, vec![
            "What if the ground beneath your feet could power your entire home?",
            "Most people don't realize they can create [solution] using just [simple materials]...",
            "This breakthrough discovery is changing how people think about [problem]...",
            "Did you know you can [achieve goal] using only [accessible resource]?",
        ]),
        (Niche::Health, vec![
            "Scientists studying [topic] discovered something that may surprise you...",
            "What if the real cause of [problem] isn't what you've been told?",
            "Recent research reveals a natural approach that may help support [benefit]...",
            "This might explain why traditional [solutions] haven't worked...",
        ]),
    ]);
}

/// Example hooks for a niche; niches without their own set use the health hooks
pub fn niche_hooks(niche: Niche) -> &'static [&'static str] {
    NICHE_HOOKS
        .get(&niche)
        .or_else(|| NICHE_HOOKS.get(&Niche::Health))
        .map(|hooks| hooks.as_slice())
        .unwrap_or(&[])
}

/// Render a phrase table as a bulleted block for a prompt
pub fn bullet_list<'a, I>(phrases: I) -> String
where
    I: IntoIterator<Item = &'a &'static str>,
{
    phrases
        .into_iter()
        .map(|p| format!("- {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_niche_hooks_fall_back_to_health() {
        assert_eq!(niche_hooks(Niche::Finance), niche_hooks(Niche::Health));
        assert_eq!(niche_hooks(Niche::Other).len(), 4);
        assert!(niche_hooks(Niche::Woodworking)[0].contains("expensive tools"));
    }

    #[test]
    fn test_bullet_list_is_stable() {
        let first = bullet_list(COMPLIANCE_SAFE_TRANSITIONS.values());
        let second = bullet_list(COMPLIANCE_SAFE_TRANSITIONS.values());
        assert_eq!(first, second);
        assert!(first.starts_with("- According to research..."));
    }
}
