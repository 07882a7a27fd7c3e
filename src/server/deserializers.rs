use serde::Deserialize;

// ids arrive either as JSON numbers or as numeric strings depending on the client,
// both are converted to the canonical integer here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IdRepr")]
pub struct LooseId(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Str(String),
}

impl TryFrom<IdRepr> for LooseId {
    type Error = String;

    fn try_from(value: IdRepr) -> Result<Self, Self::Error> {
        match value {
            IdRepr::Int(v) => Ok(LooseId(v)),
            IdRepr::Str(s) => match s.trim().parse::<i64>() {
                Ok(v) => Ok(LooseId(v)),
                Err(_) => Err(format!("Wrong value {s}, can not parse to i64")),
            },
        }
    }
}
