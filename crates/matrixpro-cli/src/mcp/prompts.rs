//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Get predefined prompt templates for weekly planning
pub fn prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan_week".to_string(),
            description: "Lay out the coming week on the matrix board".to_string(),
            template: r#"You are a weekly planning strategist working a priority matrix board.

# Focus for the week
{focus}

# Your Task
Lay the week out on the board using MatrixPro's MCP tools.

1. Call `show_board` to see the current rows and any tasks carried forward
   from last week. Carried cells are unfinished work; schedule them first.
2. Distribute tasks for the focus across the weekday cells with `set_cell`.
   Keep P1 rows for critical-path work, P2 for operational work, P3 for
   support, and Meeting rows for syncs.
3. Add rows with `add_row` only when an initiative doesn't fit an existing
   row; keep each row's effort share honest with `update_row`.
4. Finish by calling `show_board` again and summarizing the plan: per day,
   what's scheduled and which cells are intentionally left free.

Guidelines:
- One concrete task per cell; split multi-day work across days.
- Don't mark anything complete; completion is the user's call.
- Respect the effort shares: a 50% row should carry roughly half the week."#
                .to_string(),
            arguments: vec![PromptTemplateArg {
                name: "focus".to_string(),
                description: "Main goal or theme for the week".to_string(),
                required: true,
            }],
        },
        PromptTemplate {
            name: "weekly_review".to_string(),
            description: "Review archived weeks and summarize completion trends".to_string(),
            template: r#"You are reviewing a weekly priority matrix archive.

# Your Task
1. Call `list_history` to see the archived weeks, newest first.
2. Call `show_week` for the most recent two or three entries.
3. Summarize: completion rate trend, which priority groups dominate the
   distribution, and recurring tasks that keep carrying forward without
   getting done.
4. End with two or three specific suggestions for next week's plan, tied to
   rows and days you actually saw in the archive."#
                .to_string(),
            arguments: vec![],
        },
    ]
}
