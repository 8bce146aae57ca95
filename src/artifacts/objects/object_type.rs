#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Commit,
    File,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Commit => "commit",
            ObjectType::File => "file",
        }
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "commit" => Ok(ObjectType::Commit),
            "file" => Ok(ObjectType::File),
            other => Err(anyhow::anyhow!("Invalid object type '{other}'")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
