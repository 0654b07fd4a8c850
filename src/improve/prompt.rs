use crate::improve::service::TaskType;

/// 提示词改进用的元模板。模板都要求模型只返回目标文本，
/// 解析侧按同样的约定做兜底。

const IMPROVE_TEMPLATE: &str = r#"You are an expert at writing effective prompts for AI models.

Your task is to improve the following prompt: make it clearer, more structured and more effective.

Original prompt:
{prompt}

Requirements for the improved prompt:
1. Keep the core intent and goal of the prompt
2. Make it more specific and detailed
3. Add structure where appropriate
4. Improve the wording so an AI model understands it better
5. Preserve the style and tone of the original

Return ONLY the improved prompt, without any extra explanation."#;

const ALTERNATIVES_TEMPLATE: &str = r#"You are an expert at writing effective prompts for AI models.

Your task is to produce 2-3 alternative rewordings of the following prompt. Each option must keep the core intent but use a different wording and approach.

Original prompt:
{prompt}

Requirements for the options:
1. Each option must keep the original goal of the prompt
2. Use different styles and approaches
3. The options should be equally effective
4. Make the options diverse

Answer in exactly this format:
OPTION 1:
[first option]

OPTION 2:
[second option]

OPTION 3:
[third option]"#;

const ADAPT_TEMPLATE: &str = r#"You are an expert at adapting prompts to different kinds of tasks.

Original prompt:
{prompt}

Task type: {task_type}

Adapt the prompt to the given task type:
- "code" - for programming tasks, add requirements about code structure, comments and error handling
- "analysis" - for analytical tasks, add requirements about the structure of the analysis, conclusions and evidence
- "creative" - for creative tasks, add requirements about style, tone and creativity

Return ONLY the adapted prompt, without any extra explanation."#;

const COMBINED_TEMPLATE: &str = r#"You are an expert at writing effective prompts for AI models.

Your task is to improve the following prompt and to produce alternative rewordings of it.

Original prompt:
{prompt}

Answer in the following JSON format (follow it strictly):
{
  "improved": "the improved prompt here",
  "alternatives": [
    "first alternative option",
    "second alternative option",
    "third alternative option"
  ]
}

If you cannot return JSON, use this text format instead:
IMPROVED:
[improved prompt]

ALTERNATIVES:
1. [first option]
2. [second option]
3. [third option]"#;

pub fn build_improve_prompt(prompt: &str) -> String {
    IMPROVE_TEMPLATE.replace("{prompt}", prompt)
}

pub fn build_alternatives_prompt(prompt: &str) -> String {
    ALTERNATIVES_TEMPLATE.replace("{prompt}", prompt)
}

pub fn build_adapt_prompt(prompt: &str, task: TaskType) -> String {
    ADAPT_TEMPLATE
        .replace("{prompt}", prompt)
        .replace("{task_type}", task.as_str())
}

pub fn build_combined_prompt(prompt: &str) -> String {
    COMBINED_TEMPLATE.replace("{prompt}", prompt)
}
