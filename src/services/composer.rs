use crate::error::Result;
use crate::models::Candidate;
use crate::services::matcher::normalize;
use crate::services::openai::OpenAiClient;
use tracing::debug;

const SYSTEM_PROMPT: &str = "Ești un asistent pentru recomandări de cărți. \
Răspunde în română, clar și prietenos. \
Fă recomandări NUMAI folosind candidații furnizați. \
Dacă alegi o carte anume, menționeaz-o clar și EXACT cu titlul ei în text.";

const NO_MATCHES: &str = "Nicio potrivire.";

/// Asks the LLM for a recommendation over the retrieved candidates, then
/// moves the recommended book (when one is named) to the front of the list.
#[derive(Debug, Clone)]
pub struct AnswerComposer {
    openai: OpenAiClient,
}

impl AnswerComposer {
    pub fn new(openai: OpenAiClient) -> Self {
        Self { openai }
    }

    pub async fn compose(
        &self,
        query: &str,
        candidates: Vec<Candidate>,
    ) -> Result<(String, Vec<Candidate>)> {
        let context = build_context(&candidates);
        let user = format!("Cererea: {}\n\nCandidați:\n{}", query, context);

        let answer = self.openai.chat_complete(SYSTEM_PROMPT, &user).await?;
        debug!("Composer got {} chars of answer", answer.len());

        let reordered = reorder_by_recommendation(&answer, candidates);
        Ok((answer, reordered))
    }
}

/// Numbered context block handed to the LLM, preserving candidate order.
fn build_context(items: &[Candidate]) -> String {
    if items.is_empty() {
        return NO_MATCHES.to_string();
    }

    items
        .iter()
        .enumerate()
        .map(|(i, it)| {
            format!(
                "[Cand#{}] Titlu:{} | Autor:{} | An:{} | Teme:{}\nRezumat:{}",
                i + 1,
                it.title,
                it.author,
                it.year.map(|y| y.to_string()).unwrap_or_default(),
                it.themes,
                it.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Index of the candidate whose normalized title occurs in the normalized
/// answer. When several titles occur, the longest one wins so a short title
/// cannot spuriously match inside a longer one's mention.
pub fn extract_recommended_index(answer: &str, items: &[Candidate]) -> Option<usize> {
    if answer.is_empty() || items.is_empty() {
        return None;
    }

    let answer_norm = normalize(answer);
    let mut best: Option<(usize, usize)> = None;

    for (i, item) in items.iter().enumerate() {
        let title = normalize(&item.title);
        if title.is_empty() || !answer_norm.contains(&title) {
            continue;
        }
        let len = title.chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((i, len));
        }
    }

    best.map(|(i, _)| i)
}

/// Moves the recommended candidate to position 0, preserving the relative
/// order of everything else. No recommendation, or one already in front,
/// leaves the list untouched.
pub fn reorder_by_recommendation(answer: &str, mut items: Vec<Candidate>) -> Vec<Candidate> {
    if let Some(idx) = extract_recommended_index(answer, &items) {
        if idx > 0 {
            let chosen = items.remove(idx);
            items.insert(0, chosen);
        }
    }
    items
}
