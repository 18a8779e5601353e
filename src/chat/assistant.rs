use super::{
    prompts::{DIAGNOSIS_SYSTEM_PROMPT, DISEASE_INFO_SYSTEM_PROMPT, diagnosis_question},
    transcript::Transcript,
};
use crate::{
    Error, Result,
    config::{LlmConfig, SamplingConfig},
    llm::{ChatCompletionRequest, LlmClient, Role},
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Drives a session transcript against the hosted completion endpoint.
pub struct ChatAssistant {
    llm_client: Arc<dyn LlmClient>,
    system_prompt: String,
    sampling: SamplingConfig,
}

impl ChatAssistant {
    pub fn new(llm_client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            llm_client,
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DIAGNOSIS_SYSTEM_PROMPT.to_string()),
            sampling: config.sampling.clone(),
        }
    }

    /// Sends the whole transcript and appends the assistant's answer to it.
    ///
    /// A system turn is prepended first when the transcript has none.
    pub async fn reply(&self, transcript: &mut Transcript) -> Result<String> {
        if !transcript.has_system() {
            transcript.prepend_system(self.system_prompt.clone());
        }

        debug!("Sending {} turns to the LLM", transcript.len());

        let request = ChatCompletionRequest {
            messages: transcript.to_messages(),
            temperature: Some(self.sampling.temperature),
            top_p: Some(self.sampling.top_p),
            stop: self.sampling.stop.clone(),
            max_tokens: self.sampling.max_tokens,
        };

        let response = self
            .llm_client
            .create_chat_completion(request)
            .await
            .inspect_err(|e| error!("LLM call failed: {}", e))?;

        let content = response
            .first_content()
            .ok_or_else(|| Error::llm("Invalid response from API"))?
            .to_string();

        transcript.push(Role::Assistant, content.clone());
        Ok(content)
    }

    /// Resets the transcript and asks about `prediction`.
    pub async fn start_diagnosis(
        &self,
        transcript: &mut Transcript,
        prediction: &str,
    ) -> Result<String> {
        info!("Starting diagnosis conversation for label {}", prediction);

        transcript.clear();
        transcript.push(Role::System, DISEASE_INFO_SYSTEM_PROMPT);
        transcript.push(Role::User, diagnosis_question(prediction));

        self.reply(transcript).await
    }
}
