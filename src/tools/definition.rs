//! The closed set of tools advertised to the oracle
//!
//! Each tool has a name, a description, a JSON schema for its input and a
//! schema check that runs before any handler.

use serde_json::{Map, Value, json};

use super::error::ToolError;
use crate::artifact::ArtifactSlot;
use crate::llm::ToolDefinition;

/// Every tool the registry knows. Anything else the oracle names is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    CreateTest,
    CreateSolution,
    CreateSolve,
    RunTest,
    RunSolve,
}

/// Primitive type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldType {
    String,
    Boolean,
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Boolean => value.is_boolean(),
        }
    }
}

/// A declared input field
#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    kind: FieldType,
    required: bool,
    description: &'static str,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::CreateTest,
        ToolKind::CreateSolution,
        ToolKind::CreateSolve,
        ToolKind::RunTest,
        ToolKind::RunSolve,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::CreateTest => "create_test",
            ToolKind::CreateSolution => "create_solution",
            ToolKind::CreateSolve => "create_solve",
            ToolKind::RunTest => "run_test",
            ToolKind::RunSolve => "run_solve",
        }
    }

    /// Look up a tool by the name the oracle used
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::CreateTest => {
                "Write the test module for the current puzzle part. It should import the solution \
                 module and check it against the worked examples from the puzzle description. \
                 Replaces any previous test module."
            }
            ToolKind::CreateSolution => {
                "Write the solution module for the current puzzle part: a single default-exported \
                 function that takes the parsed input and returns the answer. Replaces any \
                 previous solution."
            }
            ToolKind::CreateSolve => {
                "Write the solve runner for the current puzzle part. It reads the raw input file, \
                 parses it, calls the solution and writes the answer to the output file."
            }
            ToolKind::RunTest => {
                "Run the test module against the solution. Fails with the captured output when \
                 any test fails. Pass skip=true to skip the run."
            }
            ToolKind::RunSolve => {
                "Run the solve runner on the real puzzle input. On success the result contains \
                 the produced answer. Pass skip=true to skip the run."
            }
        }
    }

    fn fields(&self) -> &'static [Field] {
        const SKIP: Field = Field {
            name: "skip",
            kind: FieldType::Boolean,
            required: false,
            description: "Skip the run and report success",
        };

        match self {
            ToolKind::CreateTest => &[Field {
                name: "test_source",
                kind: FieldType::String,
                required: true,
                description: "Full source of the test module",
            }],
            ToolKind::CreateSolution => &[Field {
                name: "solution_source",
                kind: FieldType::String,
                required: true,
                description: "Full source of the solution module",
            }],
            ToolKind::CreateSolve => &[Field {
                name: "solve_source",
                kind: FieldType::String,
                required: true,
                description: "Full source of the solve runner",
            }],
            ToolKind::RunTest | ToolKind::RunSolve => &[SKIP],
        }
    }

    /// JSON schema advertised to the oracle
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in self.fields() {
            properties.insert(
                field.name.to_string(),
                json!({"type": field.kind.name(), "description": field.description}),
            );
            if field.required {
                required.push(field.name);
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }

    /// Field carrying the source text of a `create_*` tool
    pub fn payload_field(&self) -> Option<&'static str> {
        match self {
            ToolKind::CreateTest => Some("test_source"),
            ToolKind::CreateSolution => Some("solution_source"),
            ToolKind::CreateSolve => Some("solve_source"),
            ToolKind::RunTest | ToolKind::RunSolve => None,
        }
    }

    /// Slot this tool writes or runs
    pub fn slot(&self) -> ArtifactSlot {
        match self {
            ToolKind::CreateTest | ToolKind::RunTest => ArtifactSlot::Test,
            ToolKind::CreateSolution => ArtifactSlot::Solution,
            ToolKind::CreateSolve | ToolKind::RunSolve => ArtifactSlot::Runner,
        }
    }

    /// Check arguments against the declared schema. Unknown fields are ignored.
    pub fn validate(&self, input: &Value) -> Result<(), ToolError> {
        let object = input.as_object().ok_or_else(|| ToolError::InvalidArguments {
            tool: self.name(),
            reason: "arguments must be a JSON object".to_string(),
        })?;

        for field in self.fields() {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(ToolError::MissingPayload {
                            tool: self.name(),
                            field: field.name,
                        });
                    }
                }
                Some(value) if !field.kind.accepts(value) => {
                    return Err(ToolError::InvalidArguments {
                        tool: self.name(),
                        reason: format!("`{}` must be a {}", field.name, field.kind.name()),
                    });
                }
                Some(Value::String(s)) if field.required && s.is_empty() => {
                    return Err(ToolError::MissingPayload {
                        tool: self.name(),
                        field: field.name,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("delete_everything"), None);
        assert_eq!(ToolKind::from_name("Create_Test"), None);
    }

    #[test]
    fn test_create_schema_requires_payload() {
        let schema = ToolKind::CreateSolution.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["solution_source"]["type"], "string");
        assert_eq!(schema["required"], json!(["solution_source"]));
    }

    #[test]
    fn test_run_schema_has_optional_skip() {
        let schema = ToolKind::RunTest.input_schema();
        assert_eq!(schema["properties"]["skip"]["type"], "boolean");
        assert_eq!(schema["required"], json!([]));
    }

    #[test]
    fn test_definition_matches_kind() {
        let definition = ToolKind::CreateSolve.definition();
        assert_eq!(definition.name, "create_solve");
        assert!(!definition.description.is_empty());
    }

    #[test]
    fn test_slots() {
        assert_eq!(ToolKind::CreateTest.slot(), ArtifactSlot::Test);
        assert_eq!(ToolKind::RunTest.slot(), ArtifactSlot::Test);
        assert_eq!(ToolKind::CreateSolution.slot(), ArtifactSlot::Solution);
        assert_eq!(ToolKind::RunSolve.slot(), ArtifactSlot::Runner);
    }

    #[test]
    fn test_validate_accepts_payload() {
        let input = json!({"test_source": "test('x', () => {})", "extra": 1});
        assert!(ToolKind::CreateTest.validate(&input).is_ok());
    }

    #[test]
    fn test_validate_missing_payload() {
        for input in [json!({}), json!({"test_source": null}), json!({"test_source": ""})] {
            let err = ToolKind::CreateTest.validate(&input).unwrap_err();
            assert!(matches!(
                err,
                ToolError::MissingPayload {
                    tool: "create_test",
                    field: "test_source"
                }
            ));
        }
    }

    #[test]
    fn test_validate_wrong_type() {
        let err = ToolKind::CreateTest.validate(&json!({"test_source": 42})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));

        let err = ToolKind::RunTest.validate(&json!({"skip": "yes"})).unwrap_err();
        assert!(err.to_string().contains("`skip` must be a boolean"));
    }

    #[test]
    fn test_validate_non_object() {
        let err = ToolKind::RunSolve.validate(&json!("skip")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool: "run_solve", .. }));
    }

    #[test]
    fn test_validate_run_without_arguments() {
        assert!(ToolKind::RunTest.validate(&json!({})).is_ok());
        assert!(ToolKind::RunSolve.validate(&json!({"skip": false})).is_ok());
    }
}
