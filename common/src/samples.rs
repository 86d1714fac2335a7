//! サンプルテキスト

/// サンプルの種類
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleKind {
    Human,
    Ai,
}

const HUMAN_SAMPLE: &str = "I wasn't going to write this today. Honestly, the coffee went cold twice \
while I stared at the window, thinking about my grandmother's kitchen and that awful green \
linoleum. Maybe it's silly, but the smell of burnt toast still makes me feel about seven years old. \
Anyway. The point is, memory does strange things when you let it wander.";

const AI_SAMPLE: &str = "Artificial intelligence has transformed numerous industries in recent years. \
It enables organizations to streamline operations, enhance decision-making, and improve customer \
experiences. Furthermore, machine learning models can analyze vast amounts of data efficiently. \
In conclusion, AI represents a significant opportunity for businesses seeking to remain competitive.";

impl SampleKind {
    pub fn text(&self) -> &'static str {
        match self {
            SampleKind::Human => HUMAN_SAMPLE,
            SampleKind::Ai => AI_SAMPLE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SampleKind::Human => "Human sample",
            SampleKind::Ai => "AI sample",
        }
    }
}

impl std::str::FromStr for SampleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "h" => Ok(SampleKind::Human),
            "ai" | "a" => Ok(SampleKind::Ai),
            _ => Err(format!("Unknown sample: {}. Use human or ai", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MIN_TEXT_LENGTH;

    #[test]
    fn test_samples_pass_validation() {
        for kind in [SampleKind::Human, SampleKind::Ai] {
            assert!(kind.text().trim().chars().count() >= MIN_TEXT_LENGTH);
        }
    }

    #[test]
    fn test_sample_from_str() {
        assert_eq!("Human".parse::<SampleKind>(), Ok(SampleKind::Human));
        assert_eq!("ai".parse::<SampleKind>(), Ok(SampleKind::Ai));
        assert!("robot".parse::<SampleKind>().is_err());
    }
}
