use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: u64,
    pub content: String,
    pub status: Status,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "Por Hacer")]
    PorHacer,
    #[serde(rename = "En Progreso")]
    EnProgreso,
    Hecho,
}

impl Status {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Por Hacer" => Some(Status::PorHacer),
            "En Progreso" => Some(Status::EnProgreso),
            "Hecho" => Some(Status::Hecho),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::PorHacer => "Por Hacer",
            Status::EnProgreso => "En Progreso",
            Status::Hecho => "Hecho",
        }
    }
}

// Request bodies as received on the wire. Fields are all optional so the
// validator owns every rejection message instead of the deserializer.
#[derive(Deserialize, Debug, Default)]
pub struct CreateTask {
    pub content: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateTask {
    pub content: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug)]
pub struct NewTask {
    pub content: String,
    pub status: Status,
}

#[derive(Debug)]
pub struct TaskPatch {
    pub content: Option<String>,
    pub status: Option<Status>,
}

pub fn validate_create(req: CreateTask) -> Result<NewTask, ApiError> {
    let content = validate_content(req.content)?;
    let status = match req.status {
        Some(label) => parse_status(&label)?,
        None => Status::default(),
    };
    Ok(NewTask { content, status })
}

pub fn validate_update(req: UpdateTask) -> Result<TaskPatch, ApiError> {
    // An empty patch is accepted and applied as a no-op.
    let content = match req.content {
        Some(raw) => Some(validate_content(Some(raw))?),
        None => None,
    };
    let status = match req.status {
        Some(label) => Some(parse_status(&label)?),
        None => None,
    };
    Ok(TaskPatch { content, status })
}

fn validate_content(content: Option<String>) -> Result<String, ApiError> {
    let trimmed = content.as_deref().unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(
            "'content' is required and must be a non-empty string".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_status(label: &str) -> Result<Status, ApiError> {
    Status::parse(label)
        .ok_or_else(|| ApiError::Validation(format!("'{}' is not a valid status", label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_trims_content() {
        let new = validate_create(CreateTask {
            content: Some("  Buy milk  ".to_string()),
            status: None,
        })
        .unwrap();
        assert_eq!(new.content, "Buy milk");
    }

    #[test]
    fn create_rejects_missing_content() {
        let err = validate_create(CreateTask::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn create_rejects_whitespace_content() {
        let err = validate_create(CreateTask {
            content: Some("   ".to_string()),
            status: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn create_defaults_to_por_hacer() {
        let new = validate_create(CreateTask {
            content: Some("Buy milk".to_string()),
            status: None,
        })
        .unwrap();
        assert_eq!(new.status, Status::PorHacer);
    }

    #[test]
    fn create_accepts_every_board_column() {
        for (label, expected) in [
            ("Por Hacer", Status::PorHacer),
            ("En Progreso", Status::EnProgreso),
            ("Hecho", Status::Hecho),
        ] {
            let new = validate_create(CreateTask {
                content: Some("Buy milk".to_string()),
                status: Some(label.to_string()),
            })
            .unwrap();
            assert_eq!(new.status, expected);
        }
    }

    #[test]
    fn create_rejects_unknown_status() {
        let err = validate_create(CreateTask {
            content: Some("Buy milk".to_string()),
            status: Some("Done".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn update_with_no_fields_is_an_empty_patch() {
        let patch = validate_update(UpdateTask::default()).unwrap();
        assert!(patch.content.is_none());
        assert!(patch.status.is_none());
    }

    #[test]
    fn update_rejects_blank_content() {
        let err = validate_update(UpdateTask {
            content: Some("  ".to_string()),
            status: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn status_uses_spanish_labels_on_the_wire() {
        assert_eq!(
            serde_json::to_value(Status::EnProgreso).unwrap(),
            serde_json::json!("En Progreso")
        );
        assert_eq!(Status::parse("En Progreso"), Some(Status::EnProgreso));
    }
}
