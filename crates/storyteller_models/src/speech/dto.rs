//! `text:synthesize` bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct SynthesizeRequest<'a> {
    pub input: SynthesisInput<'a>,
    pub voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    pub audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SynthesisInput<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoiceSelection<'a> {
    pub language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AudioConfig<'a> {
    pub audio_encoding: &'a str,
    pub speaking_rate: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SynthesizeResponse {
    #[serde(default)]
    pub audio_content: Option<String>,
}
