//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! Used as field names when recording onto provider spans with
//! `Span::record`, and as values for `gen_ai.operation.name`.
//!
//! Span naming convention: `"gen_ai.{operation}"` (e.g., `"gen_ai.chat"`).

// --- Required attributes ---

/// The name of the operation being performed (e.g., "chat", "image_generation").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "openai").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

// --- Recommended attributes ---

/// The model ID requested (e.g., "gpt-4o").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// The model that actually served the request.
pub const GEN_AI_RESPONSE_MODEL: &str = "gen_ai.response.model";

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The finish reasons for the response (e.g., "stop", "length").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// The unique response ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

// --- Operation name values ---

/// Chat completion with an inline photo.
pub const OP_CHAT: &str = "chat";

/// Text-to-image generation.
pub const OP_IMAGE_GENERATION: &str = "image_generation";

// --- Provider name values ---

/// OpenAI (and OpenAI-compatible) provider identifier.
pub const PROVIDER_OPENAI: &str = "openai";
