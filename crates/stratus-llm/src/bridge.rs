//! AgentBridge implementation over the OpenAI and Gemini clients.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use stratus_core::diagram::validate_diagram;
use stratus_core::ports::AgentBridge;
use stratus_core::presentation::DeckOutline;
use stratus_core::{Error, Result};

use crate::gemini::GeminiClient;
use crate::openai::OpenAiClient;
use crate::prompts;

const CHAT_MODEL: &str = "gpt-4o-mini";
const ANALYSIS_MODEL: &str = "gpt-4-turbo-preview";

/// Live bridge to the LLM providers: OpenAI for text and structured
/// output, Gemini for image understanding.
pub struct LlmBridge {
    openai: OpenAiClient,
    gemini: GeminiClient,
}

impl LlmBridge {
    pub fn new(openai_api_key: impl Into<String>, gemini_api_key: impl Into<String>) -> Self {
        Self {
            openai: OpenAiClient::new(openai_api_key),
            gemini: GeminiClient::new(gemini_api_key),
        }
    }

    pub fn with_clients(openai: OpenAiClient, gemini: GeminiClient) -> Self {
        Self { openai, gemini }
    }
}

#[async_trait]
impl AgentBridge for LlmBridge {
    async fn answer(&self, context: &str, question: &str) -> Result<String> {
        let user = format!("Account context:\n{context}\n\nQuestion: {question}");
        self.openai
            .chat(CHAT_MODEL, prompts::CHAT_SYSTEM, &user, false)
            .await
    }

    async fn analyze_image(&self, image: &[u8], prompt: &str) -> Result<String> {
        let full_prompt = format!("{} User request: {prompt}", prompts::IMAGE_SYSTEM);
        let encoded = BASE64.encode(image);
        self.gemini.generate_with_image(&full_prompt, &encoded).await
    }

    async fn synthesize_diagram(&self, inventory: &str) -> Result<Value> {
        let content = self
            .openai
            .chat(
                CHAT_MODEL,
                prompts::DIAGRAM_SYSTEM,
                &prompts::diagram_prompt(inventory),
                true,
            )
            .await?;

        let diagram: Value = serde_json::from_str(&content)
            .map_err(|e| Error::MalformedResponse(format!("diagram is not JSON: {e}")))?;
        validate_diagram(&diagram).map_err(Error::MalformedResponse)?;
        Ok(diagram)
    }

    async fn analyze_findings(&self, findings: &str) -> Result<String> {
        self.openai
            .chat(
                ANALYSIS_MODEL,
                prompts::FINDINGS_SYSTEM,
                &prompts::findings_prompt(findings),
                false,
            )
            .await
    }

    async fn outline_presentation(&self, analysis: &str) -> Result<DeckOutline> {
        let content = self
            .openai
            .chat(
                ANALYSIS_MODEL,
                prompts::OUTLINE_SYSTEM,
                &prompts::outline_prompt(analysis),
                true,
            )
            .await?;

        serde_json::from_str(&content)
            .map_err(|e| Error::MalformedResponse(format!("Invalid JSON outline: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn bridge_with_completion(content: &str) -> (MockServer, LlmBridge) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })))
            .mount(&server)
            .await;

        let openai = OpenAiClient::new("k").with_base_url(server.uri());
        let bridge = LlmBridge::with_clients(openai, GeminiClient::new("k"));
        (server, bridge)
    }

    #[tokio::test]
    async fn outline_parses_json_mode_content() {
        let content = json!({
            "title": "Q1 AWS Review",
            "agenda": "Findings, actions, Q&A",
            "key_findings": ["Idle instances"],
            "recommendations": ["Rightsize"],
            "conclusion": "Act this sprint",
            "qa_points": ["Budget impact?"]
        })
        .to_string();
        let (_server, bridge) = bridge_with_completion(&content).await;

        let outline = bridge.outline_presentation("analysis text").await.unwrap();
        assert_eq!(outline.title, "Q1 AWS Review");
        assert_eq!(outline.key_findings.len(), 1);
    }

    #[tokio::test]
    async fn non_json_outline_is_malformed() {
        let (_server, bridge) = bridge_with_completion("here is your outline!").await;
        let err = bridge.outline_presentation("analysis").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn outline_missing_key_is_malformed() {
        let content = json!({"title": "t", "agenda": "a"}).to_string();
        let (_server, bridge) = bridge_with_completion(&content).await;
        let err = bridge.outline_presentation("analysis").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn synthesized_diagram_is_validated() {
        let content = json!({
            "nodes": [{"id": "a", "type": "warp_drive", "label": "A"}],
            "edges": []
        })
        .to_string();
        let (_server, bridge) = bridge_with_completion(&content).await;
        let err = bridge.synthesize_diagram("one EC2 instance").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn valid_diagram_passes_through() {
        let content = json!({
            "nodes": [
                {"id": "lb", "type": "elb", "label": "Load balancer", "x": 0, "y": 0},
                {"id": "app", "type": "ec2", "label": "App server", "x": 100, "y": 0}
            ],
            "edges": [{"id": "e1", "source": "lb", "target": "app"}]
        })
        .to_string();
        let (_server, bridge) = bridge_with_completion(&content).await;
        let diagram = bridge.synthesize_diagram("typical web app").await.unwrap();
        assert_eq!(diagram["nodes"].as_array().unwrap().len(), 2);
    }
}
