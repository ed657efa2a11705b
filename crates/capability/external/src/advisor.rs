//! 用水顾问：生成式文本服务的边界契约
//!
//! HTTP 实现对接 Gemini 风格的 generateContent REST 接口；
//! 未配置 API key 时使用禁用实现，返回固定提示文本，
//! 调用方无需区分两种实现。

use crate::error::ExternalError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// 禁用实现返回的固定文案。
pub const DISABLED_MESSAGE: &str =
    "Funcionalidade de IA desabilitada. API Key nao configurada.";

/// 咨询分析的输入指标（月度汇总的子集）。
#[derive(Debug, Clone, Copy)]
pub struct ConsumptionFigures {
    pub current_month_total: f64,
    pub previous_month_total: f64,
    pub average_daily: f64,
}

/// 用水顾问契约。
#[async_trait]
pub trait Advisor: Send + Sync {
    /// 一条简明的节水建议。
    async fn saving_tip(&self) -> Result<String, ExternalError>;

    /// 基于月度指标的用水模式分析。
    async fn consumption_analysis(
        &self,
        figures: ConsumptionFigures,
    ) -> Result<String, ExternalError>;
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// 从 generateContent 响应中提取首个文本片段。
fn extract_text(response: GenerateResponse) -> Result<String, ExternalError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ExternalError::InvalidResponse("response carries no text".to_string()))
}

/// HTTP 顾问实现。
pub struct HttpAdvisor {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpAdvisor {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ExternalError> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: GenerateResponse = response.json().await?;
        let text = extract_text(parsed)?;
        debug!(chars = text.len(), "advisor text received");
        Ok(text)
    }
}

#[async_trait]
impl Advisor for HttpAdvisor {
    async fn saving_tip(&self) -> Result<String, ExternalError> {
        self.generate(
            "Forneca uma dica concisa de economia de agua para moradores de \
             condominios no Brasil. A dica deve ser pratica, facil de implementar \
             e em portugues brasileiro.",
        )
        .await
    }

    async fn consumption_analysis(
        &self,
        figures: ConsumptionFigures,
    ) -> Result<String, ExternalError> {
        let prompt = format!(
            "Voce e um assistente especializado em analise de consumo de agua para \
             condominios. Analise os seguintes dados de consumo (em m3):\n\
             - Consumo total do mes atual: {:.2} m3\n\
             - Consumo total do mes anterior: {:.2} m3\n\
             - Media diaria de consumo no mes atual: {:.2} m3\n\n\
             Com base nesses dados:\n\
             1. Forneca um breve insight (1-2 frases) sobre o padrao de consumo.\n\
             2. Sugira uma dica de economia de agua acionavel para este contexto.\n\n\
             Responda em portugues brasileiro, de forma clara e concisa. Use no \
             maximo 50 palavras para o insight e 50 palavras para a dica.",
            figures.current_month_total, figures.previous_month_total, figures.average_daily,
        );
        self.generate(&prompt).await
    }
}

/// 未配置 API key 时的禁用实现。
pub struct DisabledAdvisor;

#[async_trait]
impl Advisor for DisabledAdvisor {
    async fn saving_tip(&self) -> Result<String, ExternalError> {
        Ok(DISABLED_MESSAGE.to_string())
    }

    async fn consumption_analysis(
        &self,
        _figures: ConsumptionFigures,
    ) -> Result<String, ExternalError> {
        Ok(DISABLED_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_text_takes_first_candidate_part() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Feche a torneira." }, { "text": "extra" }] }
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Feche a torneira.");
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(ExternalError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn disabled_advisor_returns_static_message() {
        let advisor = DisabledAdvisor;
        assert_eq!(advisor.saving_tip().await.unwrap(), DISABLED_MESSAGE);
        let figures = ConsumptionFigures {
            current_month_total: 10.0,
            previous_month_total: 8.0,
            average_daily: 0.5,
        };
        assert_eq!(
            advisor.consumption_analysis(figures).await.unwrap(),
            DISABLED_MESSAGE
        );
    }
}
