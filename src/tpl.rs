use std::collections::HashMap;

/// Template processor for resolving `@variable@` placeholders
pub struct Tpl {
    variables: HashMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Parse a string and resolve all registered `@variable@` references.
    ///
    /// Substitution is plain text and nothing is ever escaped. Placeholders
    /// are delimited on both sides, so `$`-prefixed shell variables in the
    /// input pass through untouched and a key never matches a prefix of a
    /// longer identifier.
    pub fn parse(&self, input: &str) -> String {
        let mut result = input.to_string();

        for (key, value) in &self.variables {
            let pattern = format!("@{}@", key);
            result = result.replace(&pattern, value);
        }

        result
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parsing() {
        let mut tpl = Tpl::new();
        tpl.register("shell", "bash");

        let result = tpl.parse("#!/bin/@shell@");
        assert_eq!(result, "#!/bin/bash");
    }

    #[test]
    fn test_multiple_occurrences() {
        let mut tpl = Tpl::new();
        tpl.register("shell", "sh");

        let result = tpl.parse(". \"$prefix/setup.@shell@\" # rendered for @shell@");
        assert_eq!(result, ". \"$prefix/setup.sh\" # rendered for sh");
    }

    #[test]
    fn test_shell_syntax_untouched() {
        let mut tpl = Tpl::new();
        tpl.register("shell", "bash");

        // $-variables and unregistered placeholders are not substitution targets.
        let result = tpl.parse("PATH=\"$PWD/bin:$PATH\" && echo @unknown@");
        assert_eq!(result, "PATH=\"$PWD/bin:$PATH\" && echo @unknown@");
    }
}
