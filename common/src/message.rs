use core::fmt;

/// One info message: a list of commands, each sent on its own line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRequest {
    commands: Vec<String>,
}

impl InfoRequest {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn single(command: impl Into<String>) -> Self {
        Self {
            commands: vec![command.into()],
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Size of the encoded body, one trailing newline per command.
    pub fn body_len(&self) -> usize {
        self.commands.iter().map(|c| c.len() + 1).sum()
    }
}

/// A node's answer: `(name, value)` pairs in the order the node sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoReply {
    entries: Vec<(String, String)>,
}

impl InfoReply {
    /// Parses a reply body of `name\tvalue` lines. A line without a tab is a
    /// name with an empty value.
    pub fn parse(body: &str) -> Self {
        body.lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (name, value) = line.split_once('\t').unwrap_or((line, ""));
                (name.to_string(), value.to_string())
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for InfoReply {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for InfoReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{}\t{}", name, value)?;
        }
        Ok(())
    }
}
