//! Completion enumeration for content assist
//!
//! Walks every scope of a [`ResolutionContext`] and produces insertable
//! placeholders. Nothing is cached; call again after the context changes.

use linkexpr_domain::environment::{ProcessScope, ResolutionContext, SpecialDirectory};
use linkexpr_domain::expression::{
    ENVIRONMENT_TOKEN, PARAMETER_TOKEN, PATH_TOKEN, Placeholder, SEPARATOR, VARIABLE_TOKEN,
};
use linkexpr_domain::{CompletionCandidate, CompletionCategory, OperatingSystem};

/// Enumerates completion candidates for one context.
#[derive(Debug, Clone, Copy)]
pub struct CompletionEnumerator<'a> {
    context: &'a ResolutionContext,
}

impl<'a> CompletionEnumerator<'a> {
    /// Creates an enumerator.
    #[must_use]
    pub const fn new(context: &'a ResolutionContext) -> Self {
        Self { context }
    }

    /// All candidates, in category order.
    #[must_use]
    pub fn candidates(&self) -> Vec<CompletionCandidate> {
        let mut out = Vec::new();
        self.instance(&mut out);
        self.system(&mut out);
        self.processes(&mut out);
        self.paths(&mut out);
        self.specials(&mut out);
        self.environment(&mut out);
        Self::os_selectors(&mut out);
        out
    }

    /// Candidates matching a prefix, in category order.
    ///
    /// The prefix is compared case-insensitively against the key, the
    /// `TOKEN:KEY` form and the `{{TOKEN:KEY` form. An empty prefix matches
    /// everything.
    #[must_use]
    pub fn filtered(&self, prefix: &str) -> Vec<CompletionCandidate> {
        let prefix = prefix.to_lowercase();
        self.candidates()
            .into_iter()
            .filter(|candidate| matches_prefix(candidate, &prefix))
            .collect()
    }

    /// Matching candidates grouped by category. Empty groups are omitted.
    #[must_use]
    pub fn grouped(&self, prefix: &str) -> Vec<(CompletionCategory, Vec<CompletionCandidate>)> {
        let mut groups: Vec<(CompletionCategory, Vec<CompletionCandidate>)> = Vec::new();
        for candidate in self.filtered(prefix) {
            match groups.last_mut() {
                Some((category, members)) if *category == candidate.category => {
                    members.push(candidate);
                }
                _ => groups.push((candidate.category, vec![candidate])),
            }
        }
        groups
    }

    fn instance(&self, out: &mut Vec<CompletionCandidate>) {
        for (key, entry) in self.context.instance_entries() {
            let mut candidate = CompletionCandidate::new(
                CompletionCategory::Instance,
                placeholder(VARIABLE_TOKEN, &key),
                &key,
            )
            .with_value(entry.value())
            .with_shadowed(entry.is_shadowed());
            if let Some(by) = entry.shadowed_by() {
                candidate = candidate
                    .with_description(format!("Overridden by {} variable", by.display_name()));
            }
            out.push(candidate);
        }
    }

    fn system(&self, out: &mut Vec<CompletionCandidate>) {
        let Some(system) = &self.context.system else {
            return;
        };
        out.extend(system.iter().map(|(key, value)| {
            CompletionCandidate::new(
                CompletionCategory::System,
                placeholder(VARIABLE_TOKEN, key),
                key,
            )
            .with_value(value)
        }));
    }

    fn processes(&self, out: &mut Vec<CompletionCandidate>) {
        if let Some(current) = self.context.current_process() {
            out.extend(current.parameters.iter().map(|(key, value)| {
                CompletionCandidate::new(
                    CompletionCategory::Process,
                    placeholder(PARAMETER_TOKEN, key),
                    key,
                )
                .with_value(value)
                .with_owner(&current.name)
            }));
        }

        for process in self.context.other_processes() {
            let qualifier = self.qualifier(process);
            out.extend(process.parameters.iter().map(|(key, value)| {
                CompletionCandidate::new(
                    CompletionCategory::OtherProcess,
                    placeholder(PARAMETER_TOKEN, &format!("{qualifier}{SEPARATOR}{key}")),
                    key,
                )
                .with_value(value)
                .with_owner(&process.name)
            }));
        }
    }

    /// Name of the process if it resolves back to that process, else its id.
    fn qualifier(&self, process: &'a ProcessScope) -> &'a str {
        let name = process.name.as_str();
        let unambiguous = !name.is_empty()
            && !name.contains(SEPARATOR)
            && self
                .context
                .find_process(name)
                .is_some_and(|found| found.id == process.id);
        if unambiguous { name } else { &process.id }
    }

    fn paths(&self, out: &mut Vec<CompletionCandidate>) {
        out.extend(self.context.paths.iter().map(|(key, value)| {
            let candidate =
                CompletionCandidate::new(CompletionCategory::Path, placeholder(PATH_TOKEN, key), key)
                    .with_value(value);
            match SpecialDirectory::from_key(key) {
                Some(dir) => candidate.with_description(dir.description()),
                None => candidate,
            }
        }));
    }

    fn specials(&self, out: &mut Vec<CompletionCandidate>) {
        out.extend(self.context.specials.iter().map(|(namespace, key, value)| {
            CompletionCandidate::new(
                CompletionCategory::Special,
                placeholder(namespace.token(), key),
                key,
            )
            .with_value(value)
        }));
    }

    fn environment(&self, out: &mut Vec<CompletionCandidate>) {
        out.extend(self.context.environment.iter().map(|(key, value)| {
            CompletionCandidate::new(
                CompletionCategory::Environment,
                placeholder(ENVIRONMENT_TOKEN, key),
                key,
            )
            .with_value(value)
        }));
    }

    fn os_selectors(out: &mut Vec<CompletionCandidate>) {
        out.extend(OperatingSystem::ALL.into_iter().map(|os| {
            CompletionCandidate::new(
                CompletionCategory::OsSelector,
                placeholder(os.selector_token(), ""),
                os.selector_token(),
            )
            .with_description(format!("Included only on {}", os.display_name()))
        }));
    }
}

/// Completion candidates for a context, filtered by prefix.
#[must_use]
pub fn complete(context: &ResolutionContext, prefix: &str) -> Vec<CompletionCandidate> {
    CompletionEnumerator::new(context).filtered(prefix)
}

fn placeholder(token: &str, key: &str) -> String {
    Placeholder::new(token, key).raw
}

fn matches_prefix(candidate: &CompletionCandidate, lowercase_prefix: &str) -> bool {
    if lowercase_prefix.is_empty() {
        return true;
    }
    let expression = candidate.expression.to_lowercase();
    let label = expression.strip_prefix("{{").unwrap_or(&expression);
    candidate.key.to_lowercase().starts_with(lowercase_prefix)
        || label.starts_with(lowercase_prefix)
        || expression.starts_with(lowercase_prefix)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use linkexpr_domain::environment::{SpecialConstants, SpecialNamespace, VariableScope};
    use pretty_assertions::assert_eq;

    fn create_test_context() -> ResolutionContext {
        ResolutionContext::new(OperatingSystem::Linux)
            .with_process(ProcessScope::new(
                "web",
                "Web",
                VariableScope::new().with("port", "8080"),
            ))
            .with_process(ProcessScope::new(
                "db",
                "Database",
                VariableScope::new().with("port", "5432").with("user", "app"),
            ))
            .with_current_process("web")
            .with_instance(
                VariableScope::new()
                    .with("custom.var", "instanceVariableValue")
                    .with("db.host", "localhost"),
            )
            .with_system(VariableScope::new().with("custom.var", "systemVariableValue"))
            .with_paths(VariableScope::new().with("CONFIG", "/opt/i/bin/1/config"))
            .with_specials(SpecialConstants::new().with(SpecialNamespace::Instance, "ID", "i"))
    }

    fn expressions(candidates: &[CompletionCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.expression.as_str()).collect()
    }

    #[test]
    fn test_all_candidates_in_category_order() {
        let ctx = create_test_context();
        let all = CompletionEnumerator::new(&ctx).candidates();
        assert_eq!(
            expressions(&all),
            vec![
                "{{X:custom.var}}",
                "{{X:db.host}}",
                "{{X:custom.var}}",
                "{{V:port}}",
                "{{V:Database:port}}",
                "{{V:Database:user}}",
                "{{P:CONFIG}}",
                "{{I:ID}}",
                "{{WINDOWS:}}",
                "{{LINUX:}}",
                "{{LINUX_AARCH64:}}",
                "{{MACOS:}}",
            ]
        );
        let categories: Vec<_> = all.iter().map(|c| c.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_shadowed_instance_flagged() {
        let ctx = create_test_context();
        let all = complete(&ctx, "custom");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, CompletionCategory::Instance);
        assert!(all[0].shadowed);
        assert_eq!(all[0].value.as_deref(), Some("instanceVariableValue"));
        assert_eq!(all[1].category, CompletionCategory::System);
        assert!(!all[1].shadowed);
    }

    #[test]
    fn test_prefix_forms() {
        let ctx = create_test_context();
        assert_eq!(expressions(&complete(&ctx, "DB.")), vec!["{{X:db.host}}"]);
        assert_eq!(expressions(&complete(&ctx, "x:db")), vec!["{{X:db.host}}"]);
        assert_eq!(expressions(&complete(&ctx, "{{p:")), vec!["{{P:CONFIG}}"]);
        assert_eq!(
            expressions(&complete(&ctx, "v:database")),
            vec!["{{V:Database:port}}", "{{V:Database:user}}"]
        );
        assert!(complete(&ctx, "zzz").is_empty());
    }

    #[test]
    fn test_other_process_owner() {
        let ctx = create_test_context();
        let user = complete(&ctx, "user");
        assert_eq!(user.len(), 1);
        assert_eq!(user[0].owner.as_deref(), Some("Database"));
        assert_eq!(user[0].category, CompletionCategory::OtherProcess);
    }

    #[test]
    fn test_grouped() {
        let ctx = create_test_context();
        let groups = CompletionEnumerator::new(&ctx).grouped("port");
        let summary: Vec<_> = groups.iter().map(|(c, m)| (*c, m.len())).collect();
        assert_eq!(
            summary,
            vec![
                (CompletionCategory::Process, 1),
                (CompletionCategory::OtherProcess, 1),
            ]
        );
    }

    #[test]
    fn test_qualifier_falls_back_to_id() {
        let ctx = ResolutionContext::new(OperatingSystem::Linux).with_process(ProcessScope::new(
            "p1",
            "a:b",
            VariableScope::new().with("k", "v"),
        ));
        assert_eq!(expressions(&complete(&ctx, "k")), vec!["{{V:p1:k}}"]);
    }

    #[test]
    fn test_qualifier_resolves_to_its_own_process() {
        let ctx = ResolutionContext::new(OperatingSystem::Linux)
            .with_process(ProcessScope::new("db", "Primary", VariableScope::new().with("port", "1111")))
            .with_process(ProcessScope::new("p2", "db", VariableScope::new().with("port", "2222")))
            .with_process(ProcessScope::new("p3", "Primary", VariableScope::new().with("port", "3333")));
        let candidates = complete(&ctx, "port");
        assert_eq!(
            expressions(&candidates),
            vec!["{{V:Primary:port}}", "{{V:p2:port}}", "{{V:p3:port}}"]
        );

        for candidate in &candidates {
            let placeholder = Placeholder::from_inner(
                candidate
                    .expression
                    .trim_start_matches("{{")
                    .trim_end_matches("}}"),
            );
            let (qualifier, key) = placeholder.qualified_key();
            let resolved = ctx.resolve_parameter(qualifier, key, None).unwrap();
            assert_eq!(Some(resolved.value.as_str()), candidate.value.as_deref());
        }
    }

    #[test]
    fn test_os_selector_description() {
        let ctx = ResolutionContext::new(OperatingSystem::Linux);
        let macos = complete(&ctx, "MAC");
        assert_eq!(macos.len(), 1);
        assert_eq!(macos[0].description.as_deref(), Some("Included only on macOS"));
    }
}
