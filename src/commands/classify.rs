use crate::core::{
    classification::{classify, ErrorDetails, ErrorKind},
    config::AppConfig,
    error::Result,
    print_json,
};

/// Print the classified error the status table produces for `kind`
pub fn execute_classify(
    kind: &str,
    caller_id: &str,
    details: Option<String>,
    config: &AppConfig,
) -> Result<()> {
    let kind: ErrorKind = kind.parse()?;

    let details = match kind {
        ErrorKind::ParsingError => details.map(ErrorDetails::Mismatch),
        ErrorKind::OwnerNotActivatedError => Some(ErrorDetails::Payload(config.activation_payload())),
        ErrorKind::NotFoundError | ErrorKind::Unknown => None,
    };

    print_json(&classify(kind, caller_id, details))
}
