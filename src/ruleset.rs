//! Rewrite rule definitions.
//!
//! A `RuleSet` is an ordered list of (regex pattern, literal replacement)
//! pairs applied in strict sequence to a file's content. The two built-in
//! rulesets correspond to the component-renaming sprints: each redirects a
//! fixed list of legacy `@/components/ui/*` module paths to the consolidated
//! `@jade/ui/components` entry point.
//!
//! Rulesets are plain immutable values handed to the rewriter; nothing here
//! is process-global or mutable at runtime.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// The consolidated entry point every legacy import is redirected to.
const CONSOLIDATED_IMPORT: &str = "from '@jade/ui/components'";

/// A single substitution: every non-overlapping match of `pattern` is
/// replaced with `replacement`.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    replacement: String,
}

impl PatternRule {
    /// Compiles `pattern` into a rule. Fails on invalid regex syntax.
    ///
    /// The replacement is literal text: `$` carries no capture-group meaning.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid rewrite pattern '{}'", pattern))?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    /// The source text of the match pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The literal replacement text.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// A named, ordered sequence of rules defining one sprint of renaming work.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    rules: Vec<PatternRule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, rules: Vec<PatternRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Sprint 2.3: badge, alert, label, textarea, and select.
    pub fn sprint_2_3() -> Result<Self> {
        let rules = ["badge", "alert", "label", "textarea", "select"]
            .iter()
            .map(|component| legacy_import_rule(component))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new("sprint-2.3", rules))
    }

    /// Sprint 2.4: progress, switch, scroll-area, tabs, dropdown-menu, and
    /// the dialog imports left over from an earlier sprint.
    pub fn sprint_2_4() -> Result<Self> {
        let mut rules = ["progress", "switch", "scroll-area", "tabs", "dropdown-menu"]
            .iter()
            .map(|component| legacy_import_rule(component))
            .collect::<Result<Vec<_>>>()?;
        // Anchored to a closing brace so only named-import statements match;
        // the remaining dialog files all have that shape.
        rules.push(PatternRule::new(
            r#"\} from ['"]@/components/ui/dialog['"]"#,
            format!("}} {}", CONSOLIDATED_IMPORT),
        )?);
        Ok(Self::new("sprint-2.4", rules))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends a rule to run after the existing ones.
    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// Applies every rule in order, each rule's output feeding the next
    /// rule's input. A later rule may match text introduced by an earlier
    /// replacement; that is the defined behavior, not guarded against.
    pub fn apply(&self, content: &str) -> String {
        let mut current = content.to_string();
        for rule in &self.rules {
            if let Cow::Owned(next) = rule
                .pattern
                .replace_all(&current, NoExpand(rule.replacement.as_str()))
            {
                current = next;
            }
        }
        current
    }
}

/// Builds the standard rule for one component: any `from '...'` or
/// `from "..."` clause naming the legacy module path is redirected.
fn legacy_import_rule(component: &str) -> Result<PatternRule> {
    let pattern = format!(
        r#"from ['"]@/components/ui/{}['"]"#,
        regex::escape(component)
    );
    PatternRule::new(&pattern, CONSOLIDATED_IMPORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_single_quoted_import() {
        let rules = RuleSet::sprint_2_3().unwrap();
        let out = rules.apply("import { Badge } from '@/components/ui/badge';");
        insta::assert_snapshot!(out, @"import { Badge } from '@jade/ui/components';");
    }

    #[test]
    fn rewrites_double_quoted_import() {
        let rules = RuleSet::sprint_2_3().unwrap();
        let out = rules.apply(r#"import { Label } from "@/components/ui/label";"#);
        insta::assert_snapshot!(out, @"import { Label } from '@jade/ui/components';");
    }

    #[test]
    fn leaves_unrelated_imports_alone() {
        let rules = RuleSet::sprint_2_3().unwrap();
        let source = "import { Button } from '@/components/ui/button';";
        assert_eq!(rules.apply(source), source);
    }

    #[test]
    fn leaves_unrelated_component_with_shared_prefix_alone() {
        let rules = RuleSet::sprint_2_3().unwrap();
        let source = "import { Thing } from '@/components/ui/unrelated-thing';";
        assert_eq!(rules.apply(source), source);
    }

    #[test]
    fn rewrites_every_sprint_component() {
        let rules = RuleSet::sprint_2_3().unwrap();
        for component in ["badge", "alert", "label", "textarea", "select"] {
            let source = format!("import x from '@/components/ui/{}';", component);
            assert_eq!(
                rules.apply(&source),
                "import x from '@jade/ui/components';",
                "component {} was not rewritten",
                component
            );
        }
    }

    #[test]
    fn hyphenated_components_match_literally() {
        let rules = RuleSet::sprint_2_4().unwrap();
        let out = rules.apply("import { ScrollArea } from '@/components/ui/scroll-area';");
        assert_eq!(out, "import { ScrollArea } from '@jade/ui/components';");
        // The escaped '-' must not behave as a character class.
        let source = "import { X } from '@/components/ui/scrollXarea';";
        assert_eq!(rules.apply(source), source);
    }

    #[test]
    fn dialog_rule_requires_named_import_shape() {
        let rules = RuleSet::sprint_2_4().unwrap();
        let named = "import { Dialog, DialogContent } from '@/components/ui/dialog';";
        assert_eq!(
            rules.apply(named),
            "import { Dialog, DialogContent } from '@jade/ui/components';"
        );
        // A default import has no closing brace before `from`, so the
        // anchored rule leaves it untouched.
        let default_import = "import Dialog from '@/components/ui/dialog';";
        assert_eq!(rules.apply(default_import), default_import);
    }

    #[test]
    fn applies_rules_sequentially() {
        let rules = RuleSet::new(
            "chained",
            vec![
                PatternRule::new("alpha", "beta").unwrap(),
                PatternRule::new("beta", "gamma").unwrap(),
            ],
        );
        // The second rule sees the first rule's output.
        assert_eq!(rules.apply("alpha"), "gamma");
    }

    #[test]
    fn replacement_dollar_signs_are_literal() {
        let rules = RuleSet::new(
            "literal",
            vec![PatternRule::new("(price)", "$1 cost").unwrap()],
        );
        assert_eq!(rules.apply("price"), "$1 cost");
    }

    #[test]
    fn apply_is_idempotent() {
        let rules = RuleSet::sprint_2_3().unwrap();
        let source = "import { Badge } from '@/components/ui/badge';\n\
                      import { Select } from \"@/components/ui/select\";\n";
        let once = rules.apply(source);
        let twice = rules.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn rewrites_all_occurrences_in_one_file() {
        let rules = RuleSet::sprint_2_3().unwrap();
        let source = "import { Badge } from '@/components/ui/badge';\n\
                      const lazy = () => import('@/components/ui/button');\n\
                      import { Select } from '@/components/ui/select';\n";
        let out = rules.apply(source);
        assert!(!out.contains("@/components/ui/badge"));
        assert!(!out.contains("@/components/ui/select"));
        assert!(out.contains("@/components/ui/button"));
        assert_eq!(out.matches("@jade/ui/components").count(), 2);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = PatternRule::new("[unclosed", "x").unwrap_err();
        assert!(err.to_string().contains("Invalid rewrite pattern"));
    }
}
