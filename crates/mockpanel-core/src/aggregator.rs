//! Jury verdict aggregation engine.
//!
//! Synthesizes N independent [`PanelistVerdict`]s into one [`JuryVerdict`]:
//! a final decision, a pooled overall score, a per-dimension breakdown,
//! consensus strengths, a red-flag union, and an explicit disagreement
//! model. Pure and deterministic — no I/O, no hidden state, identical
//! input always yields byte-identical output.

use crate::verdict::{
    Disagreement, FinalDecision, JuryVerdict, PanelistVerdict, Position, ScoreBreakdown, Verdict,
};

/// Severity spread at or above which the panel is considered split.
const DISAGREEMENT_SPREAD: u8 = 2;

/// Neutral overall score returned when no dimension scores exist at all.
/// The upstream invoker guarantees non-empty score lists, but the engine
/// must remain total.
const NEUTRAL_SCORE: u8 = 50;

/// Minimum number of panelists that must report a strength for it to count
/// as consensus.
const CONSENSUS_THRESHOLD: usize = 2;

/// Aggregate a set of panelist verdicts into a single jury verdict.
pub fn aggregate_verdicts(verdicts: &[PanelistVerdict]) -> JuryVerdict {
    JuryVerdict {
        final_decision: final_decision(verdicts),
        overall_score: overall_score(verdicts),
        breakdown: breakdown(verdicts),
        strengths: consensus_strengths(verdicts),
        red_flags: red_flag_union(verdicts),
        disagreements: find_disagreements(verdicts),
        panelist_verdicts: verdicts.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Final decision
// ---------------------------------------------------------------------------

/// Category-count decision rules, first match wins:
///
/// 1. Any `strong_fail` vetoes the candidate outright.
/// 2. Two or more `fail`s veto the candidate.
/// 3. A unanimous pass-side panel clears the candidate.
/// 4. A pass-side supermajority with at most one `borderline` clears them.
/// 5. Two or more `borderline`s leave the panel undecided.
/// 6. Any remaining mix defaults to undecided.
fn final_decision(verdicts: &[PanelistVerdict]) -> FinalDecision {
    let count = |v: Verdict| verdicts.iter().filter(|pv| pv.verdict == v).count();

    let strong_fail = count(Verdict::StrongFail);
    let fail = count(Verdict::Fail);
    let borderline = count(Verdict::Borderline);
    let pass_side = count(Verdict::Pass) + count(Verdict::StrongPass);

    if strong_fail > 0 {
        return FinalDecision::Fail;
    }
    if fail >= 2 {
        return FinalDecision::Fail;
    }
    if pass_side == verdicts.len() && !verdicts.is_empty() {
        return FinalDecision::Pass;
    }
    if pass_side >= 2 && borderline <= 1 {
        return FinalDecision::Pass;
    }
    if borderline >= 2 {
        return FinalDecision::Borderline;
    }
    FinalDecision::Borderline
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Pool every dimension score across every panelist (flat, unweighted),
/// average on the 1–5 scale, rescale to 0–100.
fn overall_score(verdicts: &[PanelistVerdict]) -> u8 {
    let mut total: u32 = 0;
    let mut count: u32 = 0;
    for pv in verdicts {
        for ds in &pv.scores {
            total += u32::from(ds.score);
            count += 1;
        }
    }
    if count == 0 {
        return NEUTRAL_SCORE;
    }
    let mean = f64::from(total) / f64::from(count);
    (mean / 5.0 * 100.0).round() as u8
}

/// Group dimension scores by name across all panelists (first-seen order),
/// average per group on the 1–5 scale, rescale to 0–100, equal weights.
fn breakdown(verdicts: &[PanelistVerdict]) -> Vec<ScoreBreakdown> {
    // Vec scan instead of a HashMap keeps the grouping order deterministic.
    let mut groups: Vec<(String, u32, u32)> = Vec::new();
    for pv in verdicts {
        for ds in &pv.scores {
            match groups.iter_mut().find(|(name, _, _)| *name == ds.dimension) {
                Some((_, total, count)) => {
                    *total += u32::from(ds.score);
                    *count += 1;
                }
                None => groups.push((ds.dimension.clone(), u32::from(ds.score), 1)),
            }
        }
    }

    let distinct = groups.len();
    groups
        .into_iter()
        .map(|(dimension, total, count)| ScoreBreakdown {
            dimension,
            score: (f64::from(total) / f64::from(count) * 20.0).round() as u8,
            weight: 1.0 / distinct as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Strengths and red flags
// ---------------------------------------------------------------------------

/// Strengths reported by [`CONSENSUS_THRESHOLD`] or more panelists, matched
/// case-insensitively on the exact normalized string. Falls back to the
/// first strength listed by each panelist when no agreement exists, so the
/// result is never empty while any panelist reported a strength.
fn consensus_strengths(verdicts: &[PanelistVerdict]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for pv in verdicts {
        for strength in &pv.strengths {
            let normalized = strength.to_lowercase();
            match counts.iter_mut().find(|(s, _)| *s == normalized) {
                Some((_, n)) => *n += 1,
                None => counts.push((normalized, 1)),
            }
        }
    }

    let agreed: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n >= CONSENSUS_THRESHOLD)
        .map(|(s, _)| s)
        .collect();

    if agreed.is_empty() {
        return verdicts
            .iter()
            .filter_map(|pv| pv.strengths.first().cloned())
            .collect();
    }
    agreed
}

/// Union of every panelist's red flags, deduplicated by exact identity,
/// first-seen order preserved.
fn red_flag_union(verdicts: &[PanelistVerdict]) -> Vec<String> {
    let mut flags: Vec<String> = Vec::new();
    for pv in verdicts {
        for flag in &pv.red_flags {
            if !flags.contains(flag) {
                flags.push(flag.clone());
            }
        }
    }
    flags
}

// ---------------------------------------------------------------------------
// Disagreement detection
// ---------------------------------------------------------------------------

/// Emit exactly one overall-assessment disagreement when the severity
/// spread across panelist verdicts reaches [`DISAGREEMENT_SPREAD`].
///
/// Per-dimension score variance is deliberately not analyzed — only the
/// overall verdict-label spread.
fn find_disagreements(verdicts: &[PanelistVerdict]) -> Vec<Disagreement> {
    let severities: Vec<u8> = verdicts.iter().map(|pv| pv.verdict.severity()).collect();
    let (Some(&max), Some(&min)) = (severities.iter().max(), severities.iter().min()) else {
        return Vec::new();
    };

    if max - min < DISAGREEMENT_SPREAD {
        return Vec::new();
    }

    vec![Disagreement {
        topic: "Overall Assessment".to_string(),
        positions: verdicts
            .iter()
            .map(|pv| Position {
                panelist_name: pv.panelist_name.clone(),
                stance: format!("{} ({}/5)", pv.verdict, pv.verdict.severity()),
            })
            .collect(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::DimensionScore;

    fn panelist(id: &str, verdict: Verdict) -> PanelistVerdict {
        PanelistVerdict {
            panelist_id: id.to_string(),
            panelist_name: format!("Panelist {id}"),
            verdict,
            confidence: 75,
            scores: vec![DimensionScore {
                dimension: "Structured Approach".to_string(),
                score: 3,
                rationale: "adequate".to_string(),
            }],
            strengths: vec![],
            red_flags: vec![],
            raw_feedback: String::new(),
        }
    }

    fn with_scores(mut pv: PanelistVerdict, scores: &[(&str, u8)]) -> PanelistVerdict {
        pv.scores = scores
            .iter()
            .map(|(dim, score)| DimensionScore {
                dimension: dim.to_string(),
                score: *score,
                rationale: "r".to_string(),
            })
            .collect();
        pv
    }

    fn with_strengths(mut pv: PanelistVerdict, strengths: &[&str]) -> PanelistVerdict {
        pv.strengths = strengths.iter().map(|s| s.to_string()).collect();
        pv
    }

    fn with_flags(mut pv: PanelistVerdict, flags: &[&str]) -> PanelistVerdict {
        pv.red_flags = flags.iter().map(|s| s.to_string()).collect();
        pv
    }

    // -- final decision rules ------------------------------------------------

    #[test]
    fn test_all_pass_side_verdicts_yield_pass() {
        let verdicts = vec![
            panelist("a", Verdict::Pass),
            panelist("b", Verdict::StrongPass),
            panelist("c", Verdict::Pass),
        ];
        assert_eq!(final_decision(&verdicts), FinalDecision::Pass);
    }

    #[test]
    fn test_any_strong_fail_vetoes_regardless_of_other_entries() {
        let verdicts = vec![
            panelist("a", Verdict::StrongPass),
            panelist("b", Verdict::StrongPass),
            panelist("c", Verdict::StrongFail),
        ];
        assert_eq!(final_decision(&verdicts), FinalDecision::Fail);
    }

    #[test]
    fn test_two_fails_without_strong_fail_yield_fail() {
        let verdicts = vec![
            panelist("a", Verdict::Fail),
            panelist("b", Verdict::Fail),
            panelist("c", Verdict::StrongPass),
        ];
        assert_eq!(final_decision(&verdicts), FinalDecision::Fail);
    }

    #[test]
    fn test_two_passes_one_borderline_yield_pass() {
        let verdicts = vec![
            panelist("a", Verdict::Pass),
            panelist("b", Verdict::Borderline),
            panelist("c", Verdict::Pass),
        ];
        assert_eq!(final_decision(&verdicts), FinalDecision::Pass);
    }

    #[test]
    fn test_two_borderlines_yield_borderline() {
        let verdicts = vec![
            panelist("a", Verdict::Borderline),
            panelist("b", Verdict::Borderline),
            panelist("c", Verdict::Pass),
        ];
        assert_eq!(final_decision(&verdicts), FinalDecision::Borderline);
    }

    #[test]
    fn test_mixed_bag_defaults_to_borderline() {
        // One fail, one borderline, one pass: no rule above the catch-all fires.
        let verdicts = vec![
            panelist("a", Verdict::Fail),
            panelist("b", Verdict::Borderline),
            panelist("c", Verdict::Pass),
        ];
        assert_eq!(final_decision(&verdicts), FinalDecision::Borderline);
    }

    // -- overall score -------------------------------------------------------

    #[test]
    fn test_overall_score_all_fives_is_100() {
        let verdicts: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|id| {
                with_scores(
                    panelist(id, Verdict::StrongPass),
                    &[("D1", 5), ("D2", 5), ("D3", 5), ("D4", 5)],
                )
            })
            .collect();
        assert_eq!(overall_score(&verdicts), 100);
    }

    #[test]
    fn test_overall_score_all_ones_is_20() {
        let verdicts: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|id| {
                with_scores(
                    panelist(id, Verdict::StrongFail),
                    &[("D1", 1), ("D2", 1), ("D3", 1), ("D4", 1)],
                )
            })
            .collect();
        assert_eq!(overall_score(&verdicts), 20);
    }

    #[test]
    fn test_overall_score_empty_scores_defaults_to_neutral_50() {
        let mut pv = panelist("a", Verdict::Pass);
        pv.scores.clear();
        assert_eq!(overall_score(&[pv]), 50);
    }

    #[test]
    fn test_overall_score_is_always_within_bounds() {
        for score in 1..=5u8 {
            let pv = with_scores(panelist("a", Verdict::Pass), &[("D1", score)]);
            let s = overall_score(&[pv]);
            assert!((20..=100).contains(&s));
        }
    }

    // -- breakdown -----------------------------------------------------------

    #[test]
    fn test_breakdown_pools_same_dimension_across_panelists() {
        let verdicts = vec![
            with_scores(panelist("a", Verdict::Pass), &[("Communication", 4)]),
            with_scores(panelist("b", Verdict::Pass), &[("Communication", 2)]),
        ];
        let bd = breakdown(&verdicts);
        assert_eq!(bd.len(), 1);
        assert_eq!(bd[0].dimension, "Communication");
        assert_eq!(bd[0].score, 60); // avg 3.0 * 20
        assert!((bd[0].weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakdown_weights_are_equal_across_distinct_dimensions() {
        let verdicts = vec![
            with_scores(panelist("a", Verdict::Pass), &[("D1", 4), ("D2", 4)]),
            with_scores(panelist("b", Verdict::Pass), &[("D3", 4), ("D4", 4)]),
        ];
        let bd = breakdown(&verdicts);
        assert_eq!(bd.len(), 4);
        for entry in &bd {
            assert!((entry.weight - 0.25).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_breakdown_weighted_sum_matches_overall_mean() {
        // Dimensions evenly distributed: sum(score * weight) ≈ overall score.
        let verdicts = vec![
            with_scores(panelist("a", Verdict::Pass), &[("D1", 5), ("D2", 3)]),
            with_scores(panelist("b", Verdict::Pass), &[("D1", 5), ("D2", 3)]),
        ];
        let bd = breakdown(&verdicts);
        let weighted: f64 = bd.iter().map(|b| f64::from(b.score) * b.weight).sum();
        let overall = f64::from(overall_score(&verdicts));
        assert!((weighted - overall).abs() <= 1.0);
    }

    #[test]
    fn test_breakdown_preserves_first_seen_order() {
        let verdicts = vec![
            with_scores(panelist("a", Verdict::Pass), &[("Zeta", 4), ("Alpha", 4)]),
            with_scores(panelist("b", Verdict::Pass), &[("Mid", 4)]),
        ];
        let names: Vec<_> = breakdown(&verdicts)
            .into_iter()
            .map(|b| b.dimension)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    // -- strengths -----------------------------------------------------------

    #[test]
    fn test_consensus_strengths_require_two_mentions_case_insensitive() {
        let verdicts = vec![
            with_strengths(
                panelist("a", Verdict::Pass),
                &["Clear Thinking", "good metrics"],
            ),
            with_strengths(panelist("b", Verdict::Pass), &["Good Metrics", "bold"]),
            with_strengths(panelist("c", Verdict::Pass), &["clear thinking"]),
        ];
        let strengths = consensus_strengths(&verdicts);
        assert!(strengths.contains(&"clear thinking".to_string()));
        assert!(strengths.contains(&"good metrics".to_string()));
        assert!(!strengths.iter().any(|s| s.contains("bold")));
    }

    #[test]
    fn test_strengths_fall_back_to_first_of_each_panelist() {
        let verdicts = vec![
            with_strengths(panelist("a", Verdict::Pass), &["unique one", "extra"]),
            with_strengths(panelist("b", Verdict::Pass), &["unique two"]),
        ];
        let strengths = consensus_strengths(&verdicts);
        assert_eq!(strengths, vec!["unique one", "unique two"]);
    }

    #[test]
    fn test_strengths_empty_when_no_panelist_reported_any() {
        let verdicts = vec![panelist("a", Verdict::Pass)];
        assert!(consensus_strengths(&verdicts).is_empty());
    }

    // -- red flags -----------------------------------------------------------

    #[test]
    fn test_red_flags_union_deduplicates_exact_strings() {
        let verdicts = vec![
            with_flags(panelist("a", Verdict::Borderline), &["vague", "rambling"]),
            with_flags(panelist("b", Verdict::Borderline), &["vague"]),
        ];
        let flags = red_flag_union(&verdicts);
        assert_eq!(flags, vec!["vague", "rambling"]);
    }

    // -- disagreements -------------------------------------------------------

    #[test]
    fn test_disagreement_emitted_when_spread_reaches_two() {
        // severities 5, 2, 4 → spread 3
        let verdicts = vec![
            panelist("a", Verdict::StrongPass),
            panelist("b", Verdict::Fail),
            panelist("c", Verdict::Pass),
        ];
        let disagreements = find_disagreements(&verdicts);
        assert_eq!(disagreements.len(), 1);
        assert_eq!(disagreements[0].topic, "Overall Assessment");
        assert_eq!(disagreements[0].positions.len(), 3);
    }

    #[test]
    fn test_no_disagreement_when_spread_below_two() {
        // severities 4, 5, 4 → spread 1
        let verdicts = vec![
            panelist("a", Verdict::Pass),
            panelist("b", Verdict::StrongPass),
            panelist("c", Verdict::Pass),
        ];
        assert!(find_disagreements(&verdicts).is_empty());
    }

    #[test]
    fn test_disagreement_stance_format() {
        let verdicts = vec![
            panelist("a", Verdict::StrongFail),
            panelist("b", Verdict::Pass),
        ];
        let disagreements = find_disagreements(&verdicts);
        let stances: Vec<_> = disagreements[0]
            .positions
            .iter()
            .map(|p| p.stance.as_str())
            .collect();
        assert_eq!(stances, vec!["strong fail (1/5)", "pass (4/5)"]);
    }

    // -- whole-engine scenarios ----------------------------------------------

    #[test]
    fn test_unanimous_pass_scenario_end_to_end() {
        // 3 panelists, identical 4 dimensions each scored 4/5.
        let dims = [("D1", 4u8), ("D2", 4), ("D3", 4), ("D4", 4)];
        let verdicts: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|id| with_scores(panelist(id, Verdict::Pass), &dims))
            .collect();

        let jury = aggregate_verdicts(&verdicts);
        assert_eq!(jury.final_decision, FinalDecision::Pass);
        assert_eq!(jury.overall_score, 80);
        assert!(jury.disagreements.is_empty());
        assert_eq!(jury.breakdown.len(), 4);
        for entry in &jury.breakdown {
            assert_eq!(entry.score, 80);
        }
        assert_eq!(jury.panelist_verdicts.len(), 3);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let verdicts = vec![
            with_strengths(
                with_scores(panelist("a", Verdict::Pass), &[("D1", 4), ("D2", 3)]),
                &["clarity"],
            ),
            with_flags(
                with_scores(panelist("b", Verdict::Fail), &[("D1", 2), ("D3", 2)]),
                &["rambling"],
            ),
        ];
        let first = serde_json::to_string(&aggregate_verdicts(&verdicts)).unwrap();
        let second = serde_json::to_string(&aggregate_verdicts(&verdicts)).unwrap();
        assert_eq!(first, second);
    }
}
