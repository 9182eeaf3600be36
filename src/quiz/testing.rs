//! Testing utilities and verified sample sources
//!
//! Exam markup is easy to get subtly wrong in tests (brace balance, marker
//! spelling, indentation), which produces false positives. Tests should use
//! the curated sources and builders in this module instead of writing markup
//! inline, so that a format change has a single place to be fixed.

use crate::quiz::question::Marker;

/// A complete miniature exam: preamble header, two multiple-choice questions,
/// one true/false question, and a closing footer.
pub const SAMPLE_EXAM: &str = r"\documentclass{article}
\usepackage{exam}
\begin{document}

{%Q0001
\rtask What is the capital of Brazil?
\begin{answerlist}
    \ti Rio de Janeiro
    \di Brasília
    \ti São Paulo
    \ti Salvador
\end{answerlist}
}

{%Q0002
\rtask The sky is blue.
\begin{answerlist}
    \ti[V.] True
    \ti[F.] False
\end{answerlist}
}

{%Q0003
\rtask Which year did the war end?
\begin{answerlist}
    \ti 1943
    \ti 1944
    \di 1945
    \ti 1946
\end{answerlist}
}

\end{document}
";

/// A standalone true/false question block.
pub const TRUE_FALSE_BLOCK: &str = r"{%Q0200
\rtask Water boils at 100 degrees Celsius at sea level.
\begin{answerlist}
    \ti[V.] True
    \ti[F.] False
\end{answerlist}
}
";

/// Build a well-formed question block with one alternative per marker.
///
/// Alternative bodies are `alternative 0`, `alternative 1`, ... so tests can
/// track where each item lands after a shuffle.
pub fn question_block(id: &str, markers: &[Marker]) -> String {
    let mut block = format!("{{%{}\n\\rtask A generated question.\n\\begin{{answerlist}}\n", id);
    for (i, marker) in markers.iter().enumerate() {
        block.push_str("    ");
        block.push_str(marker.tag());
        block.push_str(&format!(" alternative {}\n", i));
    }
    block.push_str("\\end{answerlist}\n}\n");
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::question::Question;

    #[test]
    fn generated_block_is_brace_balanced() {
        let block = question_block("Q1", &[Marker::Regular, Marker::Correct]);
        let opens = block.matches('{').count();
        let closes = block.matches('}').count();
        assert_eq!(opens, closes);
        assert_eq!(Question::new(block).correct_answer_position(), Some(1));
    }
}
