//! Fixed content tables: phrases, emoji pools, visual themes, animation tags
//! and follow-up suggestions, keyed by emotion (and persona where styled).
//!
//! Consolidated from the several near-duplicate tables in the product's UI
//! layer into one canonical set with a single fallback rule: an empty persona
//! cell resolves to the warm cell for that emotion, which is never empty.

use crate::emotion::Emotion;
use crate::persona::{PersonaStyle, VisualTheme};

// YYC³ brand palette.
const INK: &str = "#2C3E50";
const CLOUD: &str = "#3498DB";
const BAMBOO: &str = "#27AE60";
const AMBER: &str = "#F39C12";
const BRICK: &str = "#E74C3C";
const WISTERIA: &str = "#9B59B6";
const JADE: &str = "#ECF0F1";

/// Per-emotion cell holding one list per persona.
pub(crate) struct StyledCell {
    pub warm: &'static [&'static str],
    pub humor: &'static [&'static str],
    pub encourage: &'static [&'static str],
}

impl StyledCell {
    fn get(&self, persona: PersonaStyle) -> &'static [&'static str] {
        match persona {
            PersonaStyle::Warm => self.warm,
            PersonaStyle::Humor => self.humor,
            PersonaStyle::Encourage => self.encourage,
        }
    }

    /// The canonical fallback rule: a missing (empty) persona list resolves
    /// to the warm list for the same emotion.
    pub fn resolve(&self, persona: PersonaStyle) -> &'static [&'static str] {
        let list = self.get(persona);
        if list.is_empty() {
            self.warm
        } else {
            list
        }
    }
}

pub(crate) fn phrases(emotion: Emotion) -> &'static StyledCell {
    match emotion {
        Emotion::Happy => &StyledCell {
            warm: &[
                "太棒了！您的学习热情让我感到温暖 ✨",
                "真棒！你的进步让人欣慰 🌟",
                "你的努力正在开花结果 ✨",
            ],
            humor: &[
                "哇哦！看起来今天的学习状态超级棒呢！🎉",
                "哇塞！你简直是学习小天才！🎉",
                "你这是要上天的节奏啊！🚀",
            ],
            encourage: &[
                "继续保持这种积极的学习态度！您做得很好！🚀",
                "太棒了！向着目标勇敢前进！💪",
                "继续冲刺，胜利就在前方！🏆",
            ],
        },
        Emotion::Calm => &StyledCell {
            warm: &[
                "感受到您内心的平静，让我们一起专注学习 🌙",
                "慢慢来，我会陪着你",
            ],
            humor: &[
                "像云朵一样轻松自在，学习也可以很惬意哦 ☁️",
                "来，先喝口茶放松一下 🍃",
            ],
            encourage: &[
                "保持这种沉稳的状态，稳步前进最重要 💙",
                "静水流深，稳步前行 🌊",
            ],
        },
        Emotion::Anxious => &StyledCell {
            warm: &[
                "我理解您的感受，让我们一起慢慢来 🤗",
                "别担心，每个人都有迷茫的时候 🤗",
                "深呼吸，一切都会好起来的 🌱",
            ],
            humor: &[
                "深呼吸，像小熊猫一样放松下来 🐼",
                "焦虑小怪兽又来捣乱了？我们一起赶走它！🐱",
                "别慌别慌，天塌下来还有我呢！",
            ],
            encourage: &[
                "每一步都是进步，您比想象中更强大 💪",
                "困难只是成长路上的垫脚石！💪",
                "每一次挑战都是突破的机会！⚡",
            ],
        },
        Emotion::Confused => &StyledCell {
            warm: &[
                "困惑是学习的开始，我们一起探索答案 💡",
                "有疑问很正常，说明你在认真思考 💡",
                "不懂就问，这是学习的好习惯 📚",
            ],
            humor: &[
                "小问号变成小灯泡的时刻到了！🔍",
                "脑袋打结了？来，我帮你解开！🧩",
                "问号脸是学霸的标配哦！❓",
            ],
            encourage: &[
                "提出问题是智慧的表现，继续探索！🌱",
                "疑问是智慧的开始！🎯",
                "每个问题都是进步的阶梯！💡",
            ],
        },
        Emotion::Motivated => &StyledCell {
            warm: &[
                "你的积极态度真让人感动 ✨",
                "保持这份热情，未来可期",
                "你的努力我都看在眼里 💖",
            ],
            humor: &[
                "动力满满的样子真帅！⚡",
                "你这是开了挂吧！",
                "学习狂魔上线了！🚀",
            ],
            encourage: &[
                "就是这股劲！继续冲刺！🏆",
                "你的坚持必将创造奇迹！",
                "目标就在前方，加油！💪",
            ],
        },
        Emotion::Neutral => &StyledCell {
            warm: &[
                "准备好开始学习了吗？🌸",
                "随时可以开始，我在这里陪你 ☁️",
            ],
            humor: &[
                "平平无奇的一天？我们来加点料 🎈",
                "发呆结束，开工啦 🌿",
            ],
            encourage: &[
                "选一个目标，迈出第一步 📈",
                "新的开始，从现在出发 🌟",
            ],
        },
        Emotion::Frustrated => &StyledCell {
            warm: &[
                "遇到挫折很正常，慢慢来，我陪着你 🌿",
                "先歇一歇，情绪会过去的 🕊️",
            ],
            humor: &[
                "卡关了？像小乌龟一样稳住再出发 🐢",
                "深呼吸三秒，怒气值清零 🍃",
            ],
            encourage: &[
                "挫折是强者的磨刀石！💪",
                "调整节奏，再试一次一定更好 🎯",
            ],
        },
        Emotion::Excited => &StyledCell {
            warm: &[
                "您的兴奋感染了我，让我们一起享受学习！🌟",
                "这份热情真让人开心 💖",
            ],
            humor: &[
                "兴奋值爆表！准备好迎接新知识了吗？🎊",
                "这节奏是要起飞了！🦄",
            ],
            encourage: &[
                "保持这种热情，您将收获满满！🏆",
                "乘着这股劲头冲向新高度！🚀",
            ],
        },
        Emotion::Focused => &StyledCell {
            warm: &[
                "您的专注力让我印象深刻，继续保持 🎯",
                "沉浸在学习里的你真好看 📚",
            ],
            humor: &[
                "专注模式已开启！大脑正在高速运转中 🧠",
                "学霸光环正在加载中 💻",
            ],
            encourage: &[
                "专注是成功的关键，您正走在正确的道路上！💡",
                "保持专注，目标就在眼前 🏅",
            ],
        },
        Emotion::Creative => &StyledCell {
            warm: &[
                "感受到您的创意火花在闪耀 ✨",
                "你的想法总是让人眼前一亮 💫",
            ],
            humor: &[
                "创意大爆发！您的想象力真是太棒了 🎨",
                "灵感小宇宙爆发了！🎪",
            ],
            encourage: &[
                "释放您的创造力，让想法自由飞翔！🦋",
                "大胆尝试，创新就是这样诞生的 🚀",
            ],
        },
    }
}

pub(crate) fn emoji_pool(emotion: Emotion) -> &'static StyledCell {
    match emotion {
        Emotion::Happy => &StyledCell {
            warm: &["🌟", "✨", "🌈", "🌻", "💖"],
            humor: &["🎉", "🦄", "🌈", "🎊", "🐱"],
            encourage: &["👏", "🚀", "💪", "🏆", "⭐"],
        },
        Emotion::Calm => &StyledCell {
            warm: &["🌙", "💙", "🕊️", "🌊", "☁️"],
            humor: &["😌", "🐢", "🍃", "🌸", "🦋"],
            encourage: &["🧘", "🌱", "💎", "🔮", "🌺"],
        },
        Emotion::Anxious => &StyledCell {
            warm: &["🤗", "💚", "🌿", "🕊️", "💙"],
            humor: &["🐼", "🐨", "🌸", "🍃", "🦋"],
            encourage: &["💪", "🌱", "🌟", "💖", "🌈"],
        },
        Emotion::Confused => &StyledCell {
            warm: &["💡", "🤔", "🌱", "📚", "🔍"],
            humor: &["🐔", "❓", "🤷", "🧩", "🔮"],
            encourage: &["💪", "🎯", "📈", "🚀", "⭐"],
        },
        Emotion::Motivated => &StyledCell {
            warm: &["🌟", "✨", "💖", "🌻", "🌈"],
            humor: &["🚀", "⚡", "🎉", "🦄", "🌟"],
            encourage: &["🏆", "💪", "🎯", "⭐", "🔥"],
        },
        Emotion::Neutral => &StyledCell {
            warm: &["😊", "🌸", "☁️", "🍃", "💙"],
            humor: &["😌", "🌿", "🌊", "🎈", "🌙"],
            encourage: &["📈", "🎯", "⚡", "🌟", "💫"],
        },
        Emotion::Frustrated => &StyledCell {
            warm: &["🌿", "🕊️", "💧", "🌸", "🤗"],
            humor: &["🐢", "🍃", "🌺", "🦋", "🌊"],
            encourage: &["💪", "🔥", "⚡", "🎯", "🚀"],
        },
        Emotion::Excited => &StyledCell {
            warm: &["🎉", "✨", "🌟", "💖", "🌈"],
            humor: &["🎊", "🦄", "🎪", "🎭", "🎨"],
            encourage: &["🚀", "🏆", "💯", "🔥", "⭐"],
        },
        Emotion::Focused => &StyledCell {
            warm: &["🎯", "💡", "📚", "🔍", "⚡"],
            humor: &["🤓", "🧠", "🔬", "📊", "💻"],
            encourage: &["🎓", "🏅", "📈", "🔥", "💯"],
        },
        Emotion::Creative => &StyledCell {
            warm: &["🎨", "🌟", "💫", "🦋", "🌈"],
            humor: &["🎭", "🎪", "🎵", "🎬", "🎨"],
            encourage: &["💡", "🚀", "✨", "🌟", "🎯"],
        },
    }
}

pub(crate) fn visual_theme(emotion: Emotion) -> VisualTheme {
    match emotion {
        Emotion::Happy => VisualTheme {
            primary_color: BAMBOO,
            secondary_color: JADE,
            background_gradient: "linear-gradient(135deg, #27AE6020, #3498DB10)",
        },
        Emotion::Calm => VisualTheme {
            primary_color: CLOUD,
            secondary_color: JADE,
            background_gradient: "linear-gradient(135deg, #3498DB20, #2C3E5010)",
        },
        Emotion::Anxious => VisualTheme {
            primary_color: CLOUD,
            secondary_color: JADE,
            background_gradient: "linear-gradient(135deg, #3498DB15, #ECF0F110)",
        },
        Emotion::Confused => VisualTheme {
            primary_color: WISTERIA,
            secondary_color: CLOUD,
            background_gradient: "linear-gradient(135deg, #9B59B620, #3498DB15)",
        },
        Emotion::Motivated => VisualTheme {
            primary_color: CLOUD,
            secondary_color: WISTERIA,
            background_gradient: "linear-gradient(135deg, #3498DB20, #9B59B615)",
        },
        Emotion::Neutral => VisualTheme {
            primary_color: JADE,
            secondary_color: INK,
            background_gradient: "linear-gradient(135deg, #ECF0F125, #2C3E5010)",
        },
        Emotion::Frustrated => VisualTheme {
            primary_color: BRICK,
            secondary_color: JADE,
            background_gradient: "linear-gradient(135deg, #E74C3C20, #ECF0F110)",
        },
        Emotion::Excited => VisualTheme {
            primary_color: AMBER,
            secondary_color: BAMBOO,
            background_gradient: "linear-gradient(135deg, #F39C1225, #27AE6020)",
        },
        Emotion::Focused => VisualTheme {
            primary_color: INK,
            secondary_color: CLOUD,
            background_gradient: "linear-gradient(135deg, #2C3E5025, #3498DB15)",
        },
        Emotion::Creative => VisualTheme {
            primary_color: AMBER,
            secondary_color: WISTERIA,
            background_gradient: "linear-gradient(135deg, #F39C1220, #9B59B615)",
        },
    }
}

pub(crate) fn animation_tag(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "bounce",
        Emotion::Calm => "fade",
        Emotion::Anxious => "gentle",
        Emotion::Confused => "shake",
        Emotion::Motivated => "pulse",
        Emotion::Neutral => "fade",
        Emotion::Frustrated => "gentle",
        Emotion::Excited => "zoom",
        Emotion::Focused => "pulse",
        Emotion::Creative => "rotate",
    }
}

/// Short next-action prompts shown alongside the feedback. Keyed by emotion
/// only; the display surface decides whether to render them.
pub fn suggestions(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Happy => &["尝试更有挑战性的内容", "分享你的学习心得"],
        Emotion::Calm => &["安排一个完整的专注时段", "整理最近的学习笔记"],
        Emotion::Anxious => &["回顾已掌握的内容", "尝试更简单的练习"],
        Emotion::Confused => &["查看相关基础知识", "寻求AI助手帮助"],
        Emotion::Motivated => &["制定更高的学习目标", "探索新的知识领域"],
        Emotion::Neutral => &["选择感兴趣的主题", "设定学习目标"],
        Emotion::Frustrated => &["休息几分钟再回来", "换一个角度重新审题"],
        Emotion::Excited => &["开启一个新章节", "挑战一道进阶题"],
        Emotion::Focused => &["趁状态好攻克难点", "记录当前的思路"],
        Emotion::Creative => &["把想法写进笔记", "尝试一个开放性练习"],
    }
}
