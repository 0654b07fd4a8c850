use log::info;

use crate::ai::{Dispatcher, EndpointConfig};
use crate::improve::parser::{
    parse_alternatives, parse_combined_json, parse_combined_text, strip_quotes, ImprovedPrompt,
};
use crate::improve::prompt::{
    build_adapt_prompt, build_alternatives_prompt, build_combined_prompt, build_improve_prompt,
};

/// 提示词适配的目标任务类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskType {
    Code,
    Analysis,
    Creative,
}

impl TaskType {
    pub fn parse(s: &str) -> Option<TaskType> {
        match s.to_lowercase().as_str() {
            "code" => Some(TaskType::Code),
            "analysis" => Some(TaskType::Analysis),
            "creative" => Some(TaskType::Creative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Code => "code",
            TaskType::Analysis => "analysis",
            TaskType::Creative => "creative",
        }
    }
}

/// 提示词改进服务：把元提示词发给选定端点，解析回复
pub struct ImproveService {
    dispatcher: Dispatcher,
}

impl ImproveService {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// 改进提示词，返回整理后的文本
    pub async fn improve(&self, cfg: &EndpointConfig, prompt: &str) -> anyhow::Result<String> {
        ensure_not_blank(prompt)?;
        let meta = build_improve_prompt(prompt);
        let resp = self.dispatcher.send_to_endpoint(cfg, &meta).await?;
        Ok(strip_quotes(resp.trim()))
    }

    /// 生成 2-3 个候选说法
    pub async fn alternatives(
        &self,
        cfg: &EndpointConfig,
        prompt: &str,
    ) -> anyhow::Result<Vec<String>> {
        ensure_not_blank(prompt)?;
        let meta = build_alternatives_prompt(prompt);
        let resp = self.dispatcher.send_to_endpoint(cfg, &meta).await?;
        let alts = parse_alternatives(&resp);
        if alts.is_empty() {
            anyhow::bail!("无法从模型回复中提取候选提示词");
        }
        info!("候选提示词解析成功: {} 条", alts.len());
        Ok(alts)
    }

    /// 按任务类型适配提示词
    pub async fn adapt(
        &self,
        cfg: &EndpointConfig,
        prompt: &str,
        task: TaskType,
    ) -> anyhow::Result<String> {
        ensure_not_blank(prompt)?;
        let meta = build_adapt_prompt(prompt, task);
        let resp = self.dispatcher.send_to_endpoint(cfg, &meta).await?;
        Ok(strip_quotes(resp.trim()))
    }

    /// 一次调用同时拿到改进结果和候选：优先 JSON，再退回文本格式
    pub async fn improve_with_alternatives(
        &self,
        cfg: &EndpointConfig,
        prompt: &str,
    ) -> anyhow::Result<ImprovedPrompt> {
        ensure_not_blank(prompt)?;
        let meta = build_combined_prompt(prompt);
        let resp = self.dispatcher.send_to_endpoint(cfg, &meta).await?;

        if let Some(parsed) = parse_combined_json(&resp) {
            return Ok(parsed);
        }
        if let Some(parsed) = parse_combined_text(&resp) {
            return Ok(parsed);
        }
        anyhow::bail!("无法解析模型回复")
    }
}

fn ensure_not_blank(prompt: &str) -> anyhow::Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("提示词不能为空");
    }
    Ok(())
}
