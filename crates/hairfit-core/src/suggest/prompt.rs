//! Prompt builders for the text and image stages.
//!
//! The text prompts ask the model for a short introduction followed by one
//! Markdown heading per hairstyle, which is the layout the section parser
//! handles best. Anything else still gets a chance via the list-item parser.

use hairfit_types::config::ResponseLanguage;
use hairfit_types::face::{FaceShape, Gender};
use hairfit_types::suggestion::RECOMMENDATION_COUNT;

/// Builds the system and user prompts sent to the vision model, and the
/// per-record prompts sent to the image model.
///
/// `shape` is `Some` for classification-guided requests and `None` in
/// direct mode, where the model infers the face shape from the photo.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Stylist persona plus the four-step analysis the model must follow.
    pub fn system(shape: Option<FaceShape>, language: &ResponseLanguage) -> String {
        let shape_step = match shape {
            Some(_) => "Confirm the face shape you were given and explain what defines it",
            None => {
                "Determine the face shape yourself (oval, round, square, heart, diamond, \
                 rectangular or oblong) and explain what defines it"
            }
        };

        format!(
            "You are a professional hair stylist who studies a person's face shape, \
             features, current hairstyle and overall look and recommends hairstyles \
             that suit them. When analysing the photo follow these steps: \
             1) Identify the person's gender (male/female/other). \
             2) {shape_step}. \
             3) Describe the current hairstyle: length, texture and color. \
             4) Recommend {RECOMMENDATION_COUNT} hairstyles that fit the person's age, look \
             and style. For every hairstyle give a) a clear name and b) a detailed \
             explanation of why it suits this person. \
             Take gender, face shape, hair type, texture and facial features into account. \
             Format the answer as well-structured Markdown: a short introduction, then \
             one `##` heading per hairstyle with the explanation below it. \
             Write the whole answer in {language}.",
            language = language.name(),
        )
    }

    /// User message text that accompanies the inline photo.
    pub fn user(shape: Option<FaceShape>, language: &ResponseLanguage) -> String {
        match shape {
            Some(shape) => format!(
                "This person's face shape has been identified as {shape}. Analyse the photo \
                 carefully and recommend {RECOMMENDATION_COUNT} hairstyles suited to a \
                 {shape} face. Explain for each one why it suits this person's face shape, \
                 hair type and overall look. Answer in {language} using Markdown.",
                language = language.name(),
            ),
            None => format!(
                "Recommend hairstyles that suit my look. Analyse my photo and recommend \
                 {RECOMMENDATION_COUNT} hairstyles for me. Explain for each one why it suits \
                 my face shape, hair type and overall look. Answer in {language} using \
                 Markdown.",
                language = language.name(),
            ),
        }
    }

    /// Image prompt for one recommendation.
    pub fn image(name: &str, shape: Option<FaceShape>, gender: Gender) -> String {
        let subject = gender.subject();
        match shape {
            Some(shape) => format!(
                "Create a professional salon portrait photograph showing a {subject} with a \
                 {shape} face shape featuring the hairstyle: \"{name}\". The image should be \
                 a clear view of a {subject} with this exact hairstyle, showing how it \
                 complements a {shape} face shape. Style: high-end salon photography, \
                 neutral studio background, high-quality professional lighting, \
                 photorealistic. Show the complete hairstyle with excellent detail. The \
                 person should match the demographics shown in the reference image."
            ),
            None => format!(
                "Create a professional salon portrait photograph showing a {subject} with \
                 the hairstyle: \"{name}\". The image should be a clear view of a {subject} \
                 with this exact hairstyle from a front-facing angle, suited to their \
                 natural face shape. Style: high-end salon photography, neutral studio \
                 background, high-quality professional lighting, photorealistic. Show the \
                 complete hairstyle with excellent detail. Make the hairstyle the main \
                 focus of the image. The person should match the demographics shown in the \
                 reference image."
            ),
        }
    }
}
