//! Keyword tables for topic and sentiment classification.
//!
//! Matching is plain case-insensitive substring search — no tokenization, no
//! language models. Lists mix Chinese and English because the feeds do.

/// Topic categories and their trigger keywords, in brief display order.
pub const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "AI",
        &[
            "人工智能", "AI", "machine learning", "deep learning", "neural network",
            "GPT", "LLM", "大模型", "ChatGPT", "Claude", "生成式AI", "AIGC",
            "stable diffusion", "midjourney", "prompt", "训练模型", "推理",
            "transformer", "BERT", "NLP", "计算机视觉", "CV", "强化学习",
        ],
    ),
    (
        "科技",
        &[
            "科技", "tech", "technology", "互联网", "internet", "软件", "software",
            "硬件", "hardware", "编程", "programming", "代码", "code",
            "开源", "open source", "GitHub", "开发者", "developer",
            "云计算", "cloud", "大数据", "big data", "区块链", "blockchain",
            "物联网", "IoT", "5G", "芯片", "半导体",
        ],
    ),
    (
        "投资",
        &[
            "投资", "investment", "股票", "stock", "基金", "fund", "理财",
            "finance", "金融", "经济", "economy", "市场", "market",
            "crypto", "加密货币", "比特币", "bitcoin", "以太坊", "eth",
            "A股", "港股", "美股", "IPO", "上市", "财报", "earnings",
            "量化", "quant", "交易策略", "trading", "收益率", "return",
        ],
    ),
    (
        "生活",
        &[
            "生活", "life", "lifestyle", "健康", "health", "健身", "fitness",
            "美食", "food", "旅行", "travel", "摄影", "photography",
            "家居", "home", "穿搭", "fashion", "护肤", "skincare",
            "读书", "reading", "电影", "movie", "音乐", "music",
            "宠物", "pet", "育儿", "parenting", "心理", "psychology",
        ],
    ),
    (
        "娱乐",
        &[
            "娱乐", "entertainment", "明星", "celebrity", "综艺", "show",
            "游戏", "game", "gaming", "电竞", "esports", "动漫", "anime",
            "八卦", "gossip", "吐槽", "搞笑", "funny", "meme",
            "追剧", "drama", "网剧", "短视频", "直播", "live",
        ],
    ),
    (
        "设计",
        &[
            "设计", "design", "UI", "UX", "界面", "interface", "视觉", "visual",
            "品牌", "branding", "插画", "illustration", "排版", "typography",
            "配色", "color", "Figma", "Sketch", "Photoshop", "创意", "creative",
            "艺术", "art", "建筑", "architecture", "室内", "interior",
        ],
    ),
];

/// Words voting for a positive sentiment tag.
pub const POSITIVE_WORDS: &[&str] = &[
    "好", "棒", "优秀", "成功", "突破", "创新", "惊喜", "推荐", "喜欢",
    "good", "great", "excellent", "amazing", "awesome", "love", "best",
    "恭喜", "胜利", "增长", "提升", "解决", "完美", "赞", "👍", "❤️",
];

/// Words voting for a negative sentiment tag.
pub const NEGATIVE_WORDS: &[&str] = &[
    "差", "糟糕", "失败", "问题", "bug", "错误", "失望", "讨厌", "恶心",
    "bad", "terrible", "awful", "hate", "worst", "fail", "error",
    "崩溃", "下降", "损失", "风险", "警告", "⚠️", "❌", "💔",
];

/// Sentiment tag names.
pub const SENTIMENT_POSITIVE: &str = "正面";
pub const SENTIMENT_NEGATIVE: &str = "负面";
pub const SENTIMENT_NEUTRAL: &str = "中性";
