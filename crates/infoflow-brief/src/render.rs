//! Brief rendering: selection + stats in, two finished documents out.
//!
//! Pure string building, no templating engine. The markdown body goes to
//! text channels (Telegram, email plain part), the HTML body to rich email.

use chrono::NaiveDate;

use crate::selector::BriefSelection;

fn chinese_date(date: NaiveDate) -> String {
    date.format("%Y年%m月%d日").to_string()
}

/// Render the markdown digest.
#[must_use]
pub fn render_markdown(title: &str, date: NaiveDate, selection: &BriefSelection) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {title}\n\n"));
    out.push_str(&format!(
        "> {} | 共收录 {} 条内容\n\n---\n\n",
        chinese_date(date),
        selection.stats.total
    ));

    out.push_str("## 📊 今日概览\n\n");
    if !selection.stats.platforms.is_empty() {
        out.push_str("**来源分布：**\n");
        for (platform, count) in &selection.stats.platforms {
            out.push_str(&format!("- {platform}: {count} 条\n"));
        }
        out.push('\n');
    }
    if !selection.stats.topics.is_empty() {
        out.push_str("**主题分布：**\n");
        for (topic, count) in &selection.stats.topics {
            out.push_str(&format!("- {topic}: {count} 条\n"));
        }
        out.push('\n');
    }

    out.push_str("---\n\n## 🔥 热门精选\n\n");
    for (index, id) in selection.heat_top_ids.iter().enumerate() {
        out.push_str(&format!("{}. [内容ID: {id}]\n", index + 1));
    }

    out.push_str("\n---\n\n## 💎 潜力发现\n\n");
    for (index, id) in selection.potential_ids.iter().enumerate() {
        out.push_str(&format!(
            "{}. [内容ID: {id}]\n   - 高潜力低热度内容，值得关注\n",
            index + 1
        ));
    }

    out.push_str("\n---\n\n## 📚 按主题浏览\n\n");
    for (topic, ids) in &selection.topic_breakdown {
        out.push_str(&format!("### {topic}\n"));
        for id in ids {
            out.push_str(&format!("- [内容ID: {id}]\n"));
        }
        out.push('\n');
    }

    out.push_str("---\n\n*由 InfoFlow Platform 自动生成*\n");
    out
}

/// Render the HTML document.
#[must_use]
pub fn render_html(title: &str, date: NaiveDate, selection: &BriefSelection) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
    out.push_str(&format!("    <title>{title}</title>\n"));
    out.push_str(
        "    <style>\n\
         body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }\n\
         h1 { color: #1a1a1a; border-bottom: 2px solid #e0e0e0; padding-bottom: 10px; }\n\
         h2 { color: #333; margin-top: 30px; }\n\
         h3 { color: #555; }\n\
         .meta { color: #666; font-size: 14px; margin-bottom: 20px; }\n\
         .stats { background: #f5f5f5; padding: 15px; border-radius: 8px; margin: 20px 0; }\n\
         .heat { background: #fff3e0; padding: 15px; border-radius: 8px; margin: 20px 0; }\n\
         .potential { background: #e3f2fd; padding: 15px; border-radius: 8px; margin: 20px 0; }\n\
         ul { padding-left: 20px; }\n\
         li { margin: 8px 0; }\n\
         .footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #e0e0e0; color: #999; font-size: 12px; text-align: center; }\n\
         </style>\n</head>\n<body>\n",
    );

    out.push_str(&format!("    <h1>{title}</h1>\n"));
    out.push_str(&format!(
        "    <div class=\"meta\">{} | 共收录 {} 条内容</div>\n",
        chinese_date(date),
        selection.stats.total
    ));

    out.push_str("    <div class=\"stats\">\n        <h2>📊 今日概览</h2>\n");
    if !selection.stats.platforms.is_empty() {
        out.push_str("        <p><strong>来源分布：</strong></p>\n        <ul>\n");
        for (platform, count) in &selection.stats.platforms {
            out.push_str(&format!("            <li>{platform}: {count} 条</li>\n"));
        }
        out.push_str("        </ul>\n");
    }
    out.push_str("    </div>\n");

    out.push_str("    <div class=\"heat\">\n        <h2>🔥 热门精选</h2>\n        <ol>\n");
    for id in &selection.heat_top_ids {
        out.push_str(&format!("            <li>内容ID: {id}</li>\n"));
    }
    out.push_str("        </ol>\n    </div>\n");

    out.push_str("    <div class=\"potential\">\n        <h2>💎 潜力发现</h2>\n        <ol>\n");
    for id in &selection.potential_ids {
        out.push_str(&format!("            <li>内容ID: {id} - 高潜力低热度内容</li>\n"));
    }
    out.push_str("        </ol>\n    </div>\n");

    out.push_str("    <h2>📚 按主题浏览</h2>\n");
    for (topic, ids) in &selection.topic_breakdown {
        out.push_str(&format!("    <h3>{topic}</h3>\n    <ul>\n"));
        for id in ids {
            out.push_str(&format!("        <li>内容ID: {id}</li>\n"));
        }
        out.push_str("    </ul>\n");
    }

    out.push_str("    <div class=\"footer\">\n        由 InfoFlow Platform 自动生成\n    </div>\n</body>\n</html>\n");
    out
}
