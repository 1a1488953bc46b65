//! Race reports: the only thing the core returns to its caller.

use std::fmt;
use std::sync::Arc;

use crate::access::{Access, StackSnapshot};
use crate::ids::BufferId;

const TOOL_NAME: &str = "racecheck";

/// A race the launch analyzer found: two accesses to the same buffer, from
/// different streams, neither ordered before the other by the
/// happens-before relation.
///
/// Closed at the core (see the module-level rationale): this is the only
/// variant, but kept as an enum so a caller matching on `Report` today does
/// not need to change if the core ever grows a second report kind.
#[derive(Debug, Clone)]
pub enum Report {
    UnsynchronizedAccess {
        buffer: BufferId,
        alloc_stack: Option<Arc<dyn StackSnapshot>>,
        current: Access,
        previous: Access,
    },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::UnsynchronizedAccess {
                buffer,
                alloc_stack,
                current,
                previous,
            } => {
                writeln!(f, "============================")?;
                writeln!(
                    f,
                    "{TOOL_NAME} detected a possible data race on buffer {buffer}"
                )?;
                writeln!(f, "Access by stream {} during kernel:", current.stream)?;
                writeln!(f, "{}", current.operator.format())?;
                writeln!(
                    f,
                    "{} argument: {}",
                    current.kind,
                    current.arg_names.join(", ")
                )?;
                writeln!(f, "With stack trace:")?;
                writeln!(f, "{}", current.stack.format())?;
                writeln!(f, "Previous access by stream {} during kernel:", previous.stream)?;
                writeln!(f, "{}", previous.operator.format())?;
                writeln!(
                    f,
                    "{} argument: {}",
                    previous.kind,
                    previous.arg_names.join(", ")
                )?;
                writeln!(f, "With stack trace:")?;
                writeln!(f, "{}", previous.stack.format())?;
                write!(f, "Buffer was allocated with stack trace:\n{}", {
                    match alloc_stack {
                        Some(stack) => stack.format(),
                        None => "Trace for buffer allocation not found.".to_string(),
                    }
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessKind, StringOperator, StringStack};
    use crate::ids::{SeqNum, StreamId};

    #[test]
    fn renders_expected_sections() {
        let current = Access::new(
            AccessKind::Read,
            SeqNum(1),
            StreamId(1),
            Arc::new(StringOperator("my_kernel".into())),
            vec!["out".into()],
            Arc::new(StringStack("at foo.rs:1".into())),
        );
        let previous = Access::new(
            AccessKind::Write,
            SeqNum(0),
            StreamId(0),
            Arc::new(StringOperator("my_kernel".into())),
            vec!["out".into()],
            Arc::new(StringStack("at bar.rs:2".into())),
        );
        let report = Report::UnsynchronizedAccess {
            buffer: BufferId(0xB),
            alloc_stack: None,
            current,
            previous,
        };

        let rendered = report.to_string();
        assert!(rendered.contains("detected a possible data race on buffer 11"));
        assert!(rendered.contains("Access by stream 1 during kernel:"));
        assert!(rendered.contains("Previous access by stream 0 during kernel:"));
        assert!(rendered.contains("Trace for buffer allocation not found."));
    }
}
