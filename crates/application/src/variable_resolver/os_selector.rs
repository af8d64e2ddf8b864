//! OS-conditional literal selection
//!
//! `{{LINUX:launch.sh}}` contributes `launch.sh` when the target is Linux and
//! nothing otherwise. Selectors never consult a scope.

use linkexpr_domain::OperatingSystem;
use linkexpr_domain::expression::{Expression, Segment, TokenKind};

/// Returns `payload` if `selector` is the target family, else `""`.
/// Matching is exact: `LINUX` does not select on `LINUX_AARCH64`.
#[must_use]
pub fn select(selector: OperatingSystem, target: OperatingSystem, payload: &str) -> &str {
    if selector == target { payload } else { "" }
}

/// Replaces every OS-selector placeholder with its selected payload.
///
/// Each occurrence is evaluated on its own. Other segments are returned
/// unchanged; selectors that contribute nothing are dropped.
#[must_use]
pub fn evaluate(segments: &[Segment], target: OperatingSystem) -> Vec<Segment> {
    segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(p) => match p.kind {
                TokenKind::OsSelector(selector) => {
                    let payload = select(selector, target, &p.key);
                    (!payload.is_empty()).then(|| Segment::Literal(payload.to_string()))
                }
                _ => Some(segment.clone()),
            },
            Segment::Literal(_) => Some(segment.clone()),
        })
        .collect()
}

/// Families mentioned by selectors, in order of first appearance.
#[must_use]
pub fn selectors(expression: &Expression) -> Vec<OperatingSystem> {
    let mut found = Vec::new();
    for placeholder in expression.placeholders() {
        if let TokenKind::OsSelector(os) = placeholder.kind
            && !found.contains(&os)
        {
            found.push(os);
        }
    }
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::variable_resolver::parser::parse;
    use pretty_assertions::assert_eq;

    const LAUNCH: &str =
        "{{WINDOWS:launch.bat}}{{LINUX:launch.sh}}{{LINUX_AARCH64:launch.sh}}-keystore.path=../some/path/keystore";

    fn render(raw: &str, target: OperatingSystem) -> String {
        let expr = parse(raw).unwrap();
        Expression::new(evaluate(expr.segments(), target)).to_string()
    }

    #[test]
    fn test_select() {
        assert_eq!(select(OperatingSystem::Linux, OperatingSystem::Linux, "a"), "a");
        assert_eq!(select(OperatingSystem::Linux, OperatingSystem::LinuxAarch64, "a"), "");
    }

    #[test]
    fn test_launch_for_each_target() {
        assert_eq!(
            render(LAUNCH, OperatingSystem::Linux),
            "launch.sh-keystore.path=../some/path/keystore"
        );
        assert_eq!(
            render(LAUNCH, OperatingSystem::Windows),
            "launch.bat-keystore.path=../some/path/keystore"
        );
        assert_eq!(
            render(LAUNCH, OperatingSystem::LinuxAarch64),
            "launch.sh-keystore.path=../some/path/keystore"
        );
    }

    #[test]
    fn test_no_branch_for_target_is_empty() {
        assert_eq!(
            render(LAUNCH, OperatingSystem::MacOs),
            "-keystore.path=../some/path/keystore"
        );
    }

    #[test]
    fn test_occurrences_are_independent() {
        assert_eq!(
            render("{{LINUX:a}} {{LINUX:b}} {{X:k}}", OperatingSystem::Linux),
            "a b {{X:k}}"
        );
    }

    #[test]
    fn test_selectors() {
        let expr = parse(LAUNCH).unwrap();
        assert_eq!(
            selectors(&expr),
            vec![
                OperatingSystem::Windows,
                OperatingSystem::Linux,
                OperatingSystem::LinuxAarch64
            ]
        );
    }
}
