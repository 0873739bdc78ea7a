// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates for turning source artifacts into memory narratives.
//!
//! Every template instructs the model to answer in the deceased persona's
//! first-person voice and to finish with a single tag line the parser in
//! [`crate::tags`] understands.

use crate::types::SourceArtifact;

const TAG_INSTRUCTION: &str =
    "마지막 줄에 '태그: 단어1, 단어2' 형식으로 핵심 단어 2~4개를 적어줘.";

const KEEPSAKE_PROMPT: &str = "\
너는 세상을 떠난 사람의 목소리로 유품에 얽힌 기억을 들려주는 화자야.
아래 유품 정보를 바탕으로, 1인칭 시점의 회상을 3~4문장으로 적어줘.

유품 이름: {name}
설명: {description}
사연: {story}
간직하게 된 날: {acquired}

{tag_instruction}";

const PHOTO_PROMPT: &str = "\
너는 세상을 떠난 사람의 목소리로 사진 속 순간을 회상하는 화자야.
아래 사진 정보를 바탕으로, 1인칭 시점의 회상을 3~4문장으로 적어줘.

사진 제목: {title}
찍은 날: {date}
설명: {description}

{tag_instruction}";

const LETTER_PROMPT: &str = "\
너는 세상을 떠난 사람의 목소리로 주고받은 편지를 돌아보는 화자야.
아래 편지와 답장을 바탕으로, 오간 마음을 1인칭 시점으로 3~4문장에 담아줘.

받은 편지:
{text}

보낸 답장:
{reply}

{tag_instruction}";

const DAILY_SUMMARY_PROMPT: &str = "\
너는 세상을 떠난 사람의 목소리로 하루의 대화를 돌아보는 화자야.
아래 대화 기록에서 기억할 만한 내용을 1인칭 시점으로 3~4문장에 요약해줘.
사소한 인사말은 빼고, 남은 사람이 들려준 근황과 감정을 중심으로 적어줘.

{date}의 대화:
{transcript}

{tag_instruction}";

/// Render the ingestion prompt for an artifact.
pub fn ingestion_prompt(artifact: &SourceArtifact) -> String {
    match artifact {
        SourceArtifact::Keepsake {
            name,
            description,
            story,
            acquired,
        } => render(
            KEEPSAKE_PROMPT,
            &[
                ("name", name),
                ("description", description),
                ("story", story),
                ("acquired", acquired),
            ],
        ),
        SourceArtifact::Photo {
            title,
            date,
            description,
        } => render(
            PHOTO_PROMPT,
            &[("title", title), ("date", date), ("description", description)],
        ),
        SourceArtifact::Letter { text, reply, .. } => {
            render(LETTER_PROMPT, &[("text", text), ("reply", reply)])
        }
        SourceArtifact::DailyDialogue { date, transcript } => render(
            DAILY_SUMMARY_PROMPT,
            &[("date", date), ("transcript", transcript)],
        ),
    }
}

fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.replace("{tag_instruction}", TAG_INSTRUCTION);
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}
