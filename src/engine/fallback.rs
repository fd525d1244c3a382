use crate::model::game_turn::GameTurnRecord;

// Keyword sets per scenario beat. Order is significant: the first matching
// category wins.
const WITNESS_KEYWORDS: [&str; 3] = ["眼镜", "视力", "看不清"];
const OBJECTION_KEYWORDS: [&str; 2] = ["爆胎", "汽车"];
const OPENING_KEYWORDS: [&str; 2] = ["你好", "开始"];

fn base_record() -> GameTurnRecord {
    GameTurnRecord {
        speaker: "Judge (Offline)".to_string(),
        text: "（AI连接波动，启动应急法官）本庭已记录你的发言。请继续出示证据。".to_string(),
        mood: "neutral".to_string(),
        jury_trust: 50,
        game_phase: "trial".to_string(),
        log: Some("Offline Mode".to_string()),
    }
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| message.contains(keyword))
}

/// Scripted stand-in for the provider: picks one of a small fixed set of
/// records from the latest player message alone. Total and deterministic;
/// history and any partial provider output are never consulted.
pub fn scripted_record(message: &str) -> GameTurnRecord {
    let mut record = base_record();

    if contains_any(message, &WITNESS_KEYWORDS) {
        record.speaker = "Witness".to_string();
        record.text = "呃……那天晚上确实很黑……我可能……也没戴眼镜……".to_string();
        record.mood = "nervous".to_string();
        record.jury_trust = 75;
        record.log = Some("击中要害 (Scripted)".to_string());
    } else if contains_any(message, &OBJECTION_KEYWORDS) {
        record.speaker = "Prosecutor".to_string();
        record.text = "反对！这只是辩方律师的臆测！你有证据证明那是爆胎声吗？".to_string();
        record.mood = "angry".to_string();
        record.jury_trust = 60;
        record.log = Some("逻辑冲突 (Scripted)".to_string());
    } else if contains_any(message, &OPENING_KEYWORDS) {
        record.speaker = "Judge".to_string();
        record.text = "庭审正式开始。辩方律师，你可以开始盘问证人了。".to_string();
        record.mood = "neutral".to_string();
    } else {
        record.speaker = "Prosecutor".to_string();
        record.text = "辩方律师，你的发言毫无逻辑。请问你到底想问证人什么？".to_string();
        record.mood = "confident".to_string();
        record.jury_trust = 45;
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eyewear_terms_route_to_nervous_witness() {
        let record = scripted_record("证人是不是没戴眼镜？");
        assert_eq!(record.speaker, "Witness");
        assert_eq!(record.mood, "nervous");
        assert_eq!(record.jury_trust, 75);
        assert!(record.text.contains("没戴眼镜"));
        assert_eq!(record.game_phase, "trial");
    }

    #[test]
    fn tire_terms_route_to_objecting_prosecutor() {
        let record = scripted_record("那声音其实是汽车爆胎");
        assert_eq!(record.speaker, "Prosecutor");
        assert_eq!(record.mood, "angry");
        assert_eq!(record.jury_trust, 60);
    }

    #[test]
    fn greeting_terms_open_the_trial() {
        let record = scripted_record("你好");
        assert_eq!(record.speaker, "Judge");
        assert_eq!(record.mood, "neutral");
        assert_eq!(record.jury_trust, 50);
        assert!(record.text.contains("庭审正式开始"));
    }

    #[test]
    fn anything_else_gets_the_generic_press() {
        let record = scripted_record("这是毫不相关的发言");
        assert_eq!(record.speaker, "Prosecutor");
        assert_eq!(record.mood, "confident");
        assert_eq!(record.jury_trust, 45);
    }

    #[test]
    fn total_over_the_empty_string() {
        let record = scripted_record("");
        assert_eq!(record.speaker, "Prosecutor");
        assert_eq!(record.jury_trust, 45);
    }

    #[test]
    fn deterministic_for_identical_input() {
        assert_eq!(scripted_record("你好"), scripted_record("你好"));
        assert_eq!(scripted_record(""), scripted_record(""));
    }

    #[test]
    fn first_matching_category_wins() {
        // Carries both a greeting and an eyewear term; eyewear is checked
        // first, so the witness record wins.
        let record = scripted_record("你好，她是不是没戴眼镜");
        assert_eq!(record.speaker, "Witness");
        assert_eq!(record.mood, "nervous");
    }
}
