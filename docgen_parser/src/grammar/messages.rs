//! Recoverable parse errors and their wording

use crate::logging::{codes, Code};
use crate::tokens::TokenKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParsingErrorMessage {
    #[error("Unexpected tag {0} at this location")]
    UnexpectedTag(TokenKind),

    #[error("Malformed tag m:for, no '|' found.")]
    MissingIterationSeparator,

    #[error("Malformed tag m:for : no iteration variable specified.")]
    MissingIterationVariable,

    #[error("Malformed tag m:for : no query expression specified.")]
    MissingIterationQuery,

    #[error("Expression \"{expression}\" is invalid: {}", .details.join(", "))]
    InvalidExpression {
        expression: String,
        details: Vec<String>,
    },

    #[error("m:elseif, m:else or m:endif expected here.")]
    ConditionalTagExpected,

    #[error("m:image tag requires a \"file\" option.")]
    MissingImageFile,

    #[error("Invalid option {key} : unknown option name")]
    UnknownOption { key: String },

    #[error("Invalid option {key} : unknown option value ({value}).")]
    UnknownOptionValue { key: String, value: String },

    #[error("Invalid option {key} : {value} is not an integer")]
    InvalidInteger { key: String, value: String },

    #[error("A forbidden character is present at the index {index} of the key definition '{key}'.")]
    ForbiddenKeyCharacter { index: usize, key: String },

    #[error("A forbidden character is present after the key value separator of the key : '{key}'.")]
    ForbiddenCharacterAfterSeparator { key: String },

    #[error("Incomplete option '{key}' : missing closing quote.")]
    IncompleteOption { key: String },

    #[error("The image tag is referencing an unknown diagram provider : '{name}'")]
    UnknownProvider { name: String },

    #[error("The image tag is referencing a provider that is not a diagram provider : '{name}'")]
    NotADiagramProvider { name: String },

    #[error("The m:diagram tag requires a \"provider\" option.")]
    MissingProvider,
}

impl ParsingErrorMessage {
    pub fn code(&self) -> Code {
        match self {
            Self::UnexpectedTag(_) => codes::template::UNEXPECTED_TAG,
            Self::MissingIterationSeparator
            | Self::MissingIterationVariable
            | Self::MissingIterationQuery => codes::template::MALFORMED_REPETITION,
            Self::InvalidExpression { .. } => codes::template::INVALID_EXPRESSION,
            Self::ConditionalTagExpected => codes::template::CONDITIONAL_TAG_EXPECTED,
            Self::MissingImageFile => codes::template::INVALID_IMAGE_TAG,
            Self::UnknownOption { .. }
            | Self::UnknownOptionValue { .. }
            | Self::InvalidInteger { .. } => codes::template::INVALID_IMAGE_OPTION,
            Self::ForbiddenKeyCharacter { .. }
            | Self::ForbiddenCharacterAfterSeparator { .. }
            | Self::IncompleteOption { .. } => codes::template::INVALID_OPTION_SYNTAX,
            Self::UnknownProvider { .. }
            | Self::NotADiagramProvider { .. }
            | Self::MissingProvider => codes::template::UNKNOWN_PROVIDER,
        }
    }
}
