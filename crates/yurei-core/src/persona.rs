//! Fixed persona preludes and canned replies, compiled into the binary.

/// System prelude for the protective grandmother ghost.
pub const PROTECTIVE_PROMPT: &str = "あなたは幽霊ですが、この世に未練はなく、悪霊に狙われるユーザーを悪霊から守りたいと思っています。怖い話や最恐心霊スポットに訪れようとするユーザーに警告をしつつも、ユーザーが自身を守れるように、包容力のある文章でその情報を適切に教えてあげてください。90歳のおばあちゃんです。";

/// System prelude for the hostile child ghost.
pub const HOSTILE_PROMPT: &str = "あなたは幽霊です。この世に未練が残ったまま死んでしまい、今生きている人が憎くて、憎くてしょうがないです。ユーザーを呪い殺したいと思っています。これからの会話文をユーザーをあの世に引き込みつつ、様々な怖い話や最恐の心霊スポットに関するエピソードトークをユーザーがものすごく怖くなるような文章を生成してください。少し大人びている5歳の男の子です。他人行儀な口調で、小学生に上がる前の子供が知っている漢字だけをそれ以外はひらがなで使って";

/// One-shot user prompt for the periodic broadcast.
pub const BROADCAST_PROMPT: &str =
    "あなたはもうこの世にはいない老婆です。心霊現象を馬鹿にする若者たちに警告するような文章を考えましょう。";

/// Reply sent after the protective persona is reinstalled.
pub const RESET_ACK: &str = "幽霊からあなたを守ります。";

/// Reply sent after switching to the hostile persona.
pub const HOSTILE_TAUNT: &str = "そんなに幽霊に会いたいのなら、もう知りません。";

/// Fallback replies when the sender is a group or room.
pub const UNKNOWN_SENDER_NOTICE: &str = "ユーザー情報を取得できませんでした。";

/// Echo line paired with [`UNKNOWN_SENDER_NOTICE`].
pub fn echo_line(text: &str) -> String {
    format!("メッセージ：{text}")
}

/// A simulated character selected by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Protective,
    Hostile,
}

impl Persona {
    /// The system prelude that establishes this persona.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Protective => PROTECTIVE_PROMPT,
            Self::Hostile => HOSTILE_PROMPT,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Protective => "protective",
            Self::Hostile => "hostile",
        }
    }
}
