//! Guided interview flow.
//!
//! A fixed, ordered sequence of framework steps that walks a candidate
//! through structuring their answer. The evaluation pipeline only ever
//! consumes the finished answer string assembled by [`FlowSession`];
//! the per-turn coaching loop lives in the LLM crate.

use serde::{Deserialize, Serialize};

/// One named step in the answer framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    Intro,
    Goal,
    Segments,
    PainPoints,
    Solutions,
    Metrics,
    Mvp,
    Complete,
}

/// Prompt and guidance for one flow step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    pub step: FlowStep,
    pub title: String,
    pub short_title: String,
    pub prompt: String,
    pub follow_up_prompts: Vec<String>,
    pub tips: Vec<String>,
    pub example_response: Option<String>,
}

fn step(
    step: FlowStep,
    title: &str,
    short_title: &str,
    prompt: &str,
    follow_ups: &[&str],
    tips: &[&str],
    example: Option<&str>,
) -> StepConfig {
    StepConfig {
        step,
        title: title.to_string(),
        short_title: short_title.to_string(),
        prompt: prompt.to_string(),
        follow_up_prompts: follow_ups.iter().map(|s| s.to_string()).collect(),
        tips: tips.iter().map(|s| s.to_string()).collect(),
        example_response: example.map(|s| s.to_string()),
    }
}

/// The fixed step order the session walks through.
pub const STEP_ORDER: [FlowStep; 8] = [
    FlowStep::Intro,
    FlowStep::Goal,
    FlowStep::Segments,
    FlowStep::PainPoints,
    FlowStep::Solutions,
    FlowStep::Metrics,
    FlowStep::Mvp,
    FlowStep::Complete,
];

impl FlowStep {
    /// The step that follows this one; `Complete` is terminal.
    pub fn next(&self) -> FlowStep {
        let idx = STEP_ORDER.iter().position(|s| s == self);
        match idx {
            Some(i) if i + 1 < STEP_ORDER.len() => STEP_ORDER[i + 1],
            _ => FlowStep::Complete,
        }
    }

    /// Progress through the framework as a 0–100 percentage.
    pub fn progress_percent(&self) -> u8 {
        let idx = STEP_ORDER.iter().position(|s| s == self).unwrap_or(0);
        ((idx as f64 / (STEP_ORDER.len() - 1) as f64) * 100.0).round() as u8
    }

    /// Prompt and guidance configuration for this step.
    pub fn config(&self) -> StepConfig {
        match self {
            FlowStep::Intro => step(
                *self,
                "Welcome",
                "Start",
                "Welcome! I'll guide you through answering this product question using a proven framework. We'll cover: Goal, User Segments, Pain Points, Solutions, Metrics, and MVP. Ready to begin?",
                &[],
                &["Take a breath", "Think out loud", "It's okay to pause"],
                None,
            ),
            FlowStep::Goal => step(
                *self,
                "Clarify the Goal",
                "Goal",
                "Let's start by clarifying the goal. What problem are we trying to solve? What's the business objective or user outcome we're aiming for?",
                &[
                    "Can you be more specific about the primary objective?",
                    "Is this about user growth, engagement, revenue, or something else?",
                    "What would success look like at a high level?",
                ],
                &[
                    "State assumptions clearly",
                    "Pick ONE primary goal to focus on",
                    "Consider both user and business goals",
                ],
                Some("I'd like to focus on improving user retention for this product. The goal is to increase the percentage of users who return within 7 days, as this is a strong indicator of product-market fit."),
            ),
            FlowStep::Segments => step(
                *self,
                "Define User Segments",
                "Segments",
                "Great! Now, who are your target users? Identify the key user segments you're focusing on. What are their characteristics, behaviors, and context?",
                &[
                    "Can you identify 2-3 distinct user segments?",
                    "Which segment is your primary focus and why?",
                    "How do these segments differ in their needs?",
                ],
                &[
                    "Identify 2-3 key segments",
                    "Prioritize one as your primary focus",
                    "Consider demographics AND behaviors",
                ],
                Some("I see three key segments: 1) Power users who use daily and want efficiency, 2) Casual users who engage weekly and need simplicity, 3) New users who need onboarding. I'll focus primarily on power users as they drive retention."),
            ),
            FlowStep::PainPoints => step(
                *self,
                "Identify Pain Points",
                "Pain Points",
                "Excellent. What are the key pain points or unmet needs for these user segments? What frustrations or challenges do they face?",
                &[
                    "Why is this pain point significant?",
                    "How are users currently working around this problem?",
                    "Which pain point is most critical to address first?",
                ],
                &[
                    "List 2-3 pain points, then prioritize",
                    "Connect pain points to user behavior",
                    "Consider emotional and functional needs",
                ],
                Some("The main pain points are: 1) Too many steps to complete core tasks, 2) No way to save progress and resume later, 3) Notifications are generic and not personalized to their needs."),
            ),
            FlowStep::Solutions => step(
                *self,
                "Propose Solutions",
                "Solutions",
                "Now let's brainstorm solutions. What features or changes would address these pain points? Think creatively but stay grounded. Give me multiple solution ideas.",
                &[
                    "Can you think of 2-3 different approaches?",
                    "How would each solution address the pain points you mentioned?",
                    "What are the trade-offs between these solutions?",
                ],
                &[
                    "Propose 2-3 solution ideas",
                    "Consider effort vs. impact for each",
                    "Think about technical feasibility",
                ],
                Some("Three potential solutions: 1) Quick Action widget - surfaces common tasks on home screen, 2) Smart Resume - auto-saves progress and reminds users, 3) Personalized notifications based on usage patterns."),
            ),
            FlowStep::Metrics => step(
                *self,
                "Define Success Metrics",
                "Metrics",
                "How would you measure success? What metrics would you track, and what targets would indicate the solutions are working?",
                &[
                    "What would be your north star metric?",
                    "How would you distinguish correlation from causation?",
                    "What guardrail metrics would you watch?",
                ],
                &[
                    "Include leading AND lagging indicators",
                    "Set specific targets, not just 'increase X'",
                    "Consider counter-metrics to avoid",
                ],
                Some("Primary metric: 7-day retention rate, target +5%. Secondary: Task completion time, target -30%. Guardrail: Ensure feature discovery doesn't decrease for new users."),
            ),
            FlowStep::Mvp => step(
                *self,
                "Define the MVP",
                "MVP",
                "Finally, what would the MVP look like? What's the smallest version you could ship to validate your hypothesis and start learning?",
                &[
                    "What features would you cut to ship faster?",
                    "How would you test this with real users?",
                    "What's your timeline for the MVP?",
                ],
                &[
                    "Focus on the core value proposition",
                    "Cut scope ruthlessly",
                    "Think about what you need to learn, not build",
                    "Define clear success criteria for the MVP",
                ],
                Some("MVP would be the Quick Action widget with just the top 3 most-used actions, hard-coded initially. We'd A/B test with 10% of power users for 2 weeks. Success = 15% increase in daily task completion. If validated, we'd add ML personalization in v2."),
            ),
            FlowStep::Complete => step(
                *self,
                "Great Job!",
                "Done",
                "Excellent work! You've completed the framework beautifully. Your structured response covers Goal, Segments, Pain Points, Solutions, Metrics, and MVP. Ready to submit for evaluation?",
                &[],
                &[],
                None,
            ),
        }
    }
}

/// Accumulates accepted per-step responses and assembles the single
/// answer string fed into the evaluation pipeline on completion.
#[derive(Debug, Clone)]
pub struct FlowSession {
    responses: Vec<(FlowStep, String)>,
    current: Option<FlowStep>,
}

impl Default for FlowSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowSession {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            current: Some(FlowStep::Intro),
        }
    }

    /// The step the session is currently on.
    pub fn current_step(&self) -> FlowStep {
        self.current.unwrap_or(FlowStep::Complete)
    }

    /// Record an accepted response for the current step and advance.
    /// Intro and Complete carry no content and are skipped.
    pub fn accept(&mut self, response: impl Into<String>) {
        let step = self.current_step();
        if !matches!(step, FlowStep::Intro | FlowStep::Complete) {
            self.responses.push((step, response.into()));
        }
        self.current = Some(step.next());
    }

    /// Advance without recording (used for the intro acknowledgement).
    pub fn advance(&mut self) {
        self.current = Some(self.current_step().next());
    }

    pub fn is_complete(&self) -> bool {
        self.current_step() == FlowStep::Complete
    }

    /// Assemble the complete answer text: one titled section per step,
    /// in framework order.
    pub fn assemble_answer(&self) -> String {
        self.responses
            .iter()
            .map(|(step, response)| format!("{}:\n{}", step.config().title, response))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
