//! Plain text response formatters for bot commands.
//!
//! The bot answers group chats of Chinese speaking players, every reply is written
//! in Chinese and sent as plain text.

use chrono::{DateTime, Utc};

use crate::truckersmp::{PlayerProfile, ServerStatus};

/// Localized yes/no.
fn yes_no(flag: bool) -> &'static str {
    if flag { "是" } else { "否" }
}

/// Formats the help message listing the keywords the bot answers to.
///
/// # Examples
///
/// ```
/// # use convoy::commands::text_response::format_help;
/// let help = format_help();
/// assert!(help.contains("服务器状态"));
/// ```
pub fn format_help() -> String {
    "可用命令：\n\
        - 服务器状态：查看 TruckersMP 服务器状态\n\
        - 查询 <玩家名称>：查询玩家信息，已绑定时可省略玩家名称\n\
        - 绑定 <玩家名称>：将玩家绑定到您的账号\n\
        - 解除绑定：解除已绑定的玩家\n\
        - 删除个人数据：删除机器人保存的您的所有数据\n\
        - 帮助：显示此帮助信息"
        .to_owned()
}

/// Formats the status of every server, one block per server in the given order.
///
/// # Examples
///
/// ```
/// # use convoy::commands::text_response::format_server_status;
/// assert_eq!(format_server_status(&[]), "TruckersMP 服务器状态：\n\n当前没有可用的服务器");
/// ```
pub fn format_server_status(servers: &[ServerStatus]) -> String {
    let mut body = "TruckersMP 服务器状态：\n\n".to_owned();

    if servers.is_empty() {
        body.push_str("当前没有可用的服务器");
        return body;
    }

    let blocks: Vec<String> = servers
        .iter()
        .map(|server| {
            format!(
                "服务器名称: {}\n当前玩家人数: {}/{}，等待人数: {}\n是否限速: {}，是否碰撞: {}",
                server.name,
                server.players,
                server.max_players,
                server.queue,
                yes_no(server.speed_limiter),
                yes_no(server.collisions)
            )
        })
        .collect();
    body.push_str(&blocks.join("\n\n"));

    body
}

pub fn format_status_error() -> String {
    "获取服务器状态时出错，请稍后再试".to_owned()
}

/// Formats a player profile.
///
/// Ban details are only shown for banned players. `now` is the reference for the
/// number of days since the player joined.
pub fn format_player_profile(profile: &PlayerProfile, now: DateTime<Utc>) -> String {
    let join_days = match profile.join_days(now) {
        Some(days) => format!("{} 天", days),
        None => "未知".to_owned(),
    };

    let mut lines = vec![
        format!("玩家昵称: {}", profile.name),
        format!("玩家ID: {}", profile.id),
        format!("是否管理员: {}", yes_no(profile.is_game_admin)),
        format!("加入时间: {}", profile.join_date),
        format!("加入天数: {}", join_days),
        format!("是否封禁: {}", yes_no(profile.banned)),
    ];

    if profile.banned {
        // No expiry means the ban is permanent
        lines.push(format!(
            "封禁时间: {}",
            profile.ban_expire.as_deref().unwrap_or("永久")
        ));
        lines.push(format!(
            "封禁次数: {}",
            profile
                .bans_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "未知".to_owned())
        ));
    }

    lines.push(format!(
        "在线状态: {}",
        if profile.online { "在线" } else { "离线" }
    ));
    lines.push(format!("Steam ID64: {}", profile.steam_id64));
    lines.push(format!("Steam ID: {}", profile.steam_id));

    match &profile.vtc {
        Some(vtc) => {
            lines.push(format!("VTC ID: {}", vtc.id));
            lines.push(format!("VTC 名称: {}", vtc.name));
            lines.push(format!("VTC 标签: {}", vtc.tag));
        }
        None => lines.push("VTC: 此玩家未加入 VTC".to_owned()),
    }

    lines.join("\n")
}

pub fn format_player_not_found(player_name: &str) -> String {
    format!("未找到玩家{}，请检查玩家名称", player_name)
}

pub fn format_lookup_error() -> String {
    "处理查询时出错，请稍后重试".to_owned()
}

/// Prompt sent when the query has no name and the user bound none.
pub fn format_missing_query_name() -> String {
    "请输入要查询的玩家名称".to_owned()
}

pub fn format_missing_bind_name() -> String {
    "请输入要绑定的玩家名称".to_owned()
}

/// # Examples
///
/// ```
/// # use convoy::commands::text_response::format_successful_bind;
/// assert_eq!(format_successful_bind("Alice"), "已将玩家Alice绑定到您的账号");
/// ```
pub fn format_successful_bind(player_name: &str) -> String {
    format!("已将玩家{}绑定到您的账号", player_name)
}

pub fn format_successful_unbind() -> String {
    "已解除绑定".to_owned()
}

pub fn format_nothing_bound() -> String {
    "您尚未绑定任何玩家".to_owned()
}

pub fn format_successful_erase() -> String {
    "您的个人数据已成功删除".to_owned()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::truckersmp::Vtc;

    fn create_test_profile() -> PlayerProfile {
        PlayerProfile {
            id: 42,
            name: "Alice".to_string(),
            is_game_admin: false,
            join_date: "2024-01-01 00:00:00".to_string(),
            banned: false,
            ban_expire: None,
            bans_count: None,
            online: true,
            steam_id64: "76561198000000000".to_string(),
            steam_id: "76561198000000000".to_string(),
            vtc: None,
            avatar: None,
        }
    }

    fn create_test_server(name: &str, players: u32, max_players: u32, queue: u32) -> ServerStatus {
        ServerStatus {
            name: name.to_string(),
            players,
            max_players,
            queue,
            speed_limiter: true,
            collisions: false,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 11, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_help() {
        let help = format_help();
        for keyword in ["服务器状态", "查询", "绑定", "解除绑定", "删除个人数据", "帮助"] {
            assert!(help.contains(keyword), "missing {}", keyword);
        }
    }

    #[test]
    fn test_format_server_status_two_servers() {
        let servers = vec![
            create_test_server("Simulation 1", 3120, 4200, 12),
            create_test_server("Arcade", 150, 2300, 0),
        ];

        let output = format_server_status(&servers);

        assert_eq!(
            output,
            "TruckersMP 服务器状态：\n\n\
            服务器名称: Simulation 1\n当前玩家人数: 3120/4200，等待人数: 12\n是否限速: 是，是否碰撞: 否\n\n\
            服务器名称: Arcade\n当前玩家人数: 150/2300，等待人数: 0\n是否限速: 是，是否碰撞: 否"
        );
        assert_eq!(output.matches("服务器名称").count(), 2);
        assert!(output.find("Simulation 1").unwrap() < output.find("Arcade").unwrap());
    }

    #[test]
    fn test_format_server_status_empty() {
        assert_eq!(
            format_server_status(&[]),
            "TruckersMP 服务器状态：\n\n当前没有可用的服务器"
        );
    }

    #[test]
    fn test_format_player_profile_not_banned() {
        let output = format_player_profile(&create_test_profile(), now());

        assert_eq!(
            output,
            "玩家昵称: Alice\n\
            玩家ID: 42\n\
            是否管理员: 否\n\
            加入时间: 2024-01-01 00:00:00\n\
            加入天数: 11 天\n\
            是否封禁: 否\n\
            在线状态: 在线\n\
            Steam ID64: 76561198000000000\n\
            Steam ID: 76561198000000000\n\
            VTC: 此玩家未加入 VTC"
        );
        assert!(!output.contains("封禁时间"));
        assert!(!output.contains("封禁次数"));
    }

    #[test]
    fn test_format_player_profile_banned() {
        let profile = PlayerProfile {
            banned: true,
            ban_expire: Some("2024-02-01 00:00:00".to_string()),
            bans_count: Some(3),
            online: false,
            ..create_test_profile()
        };

        let output = format_player_profile(&profile, now());

        assert!(output.contains("是否封禁: 是\n封禁时间: 2024-02-01 00:00:00\n封禁次数: 3\n"));
        assert!(output.contains("在线状态: 离线"));
    }

    #[test]
    fn test_format_player_profile_permanent_ban() {
        let profile = PlayerProfile {
            banned: true,
            ..create_test_profile()
        };

        let output = format_player_profile(&profile, now());

        assert!(output.contains("封禁时间: 永久"));
        assert!(output.contains("封禁次数: 未知"));
    }

    #[test]
    fn test_format_player_profile_with_vtc() {
        let profile = PlayerProfile {
            vtc: Some(Vtc {
                id: 7,
                name: "Foo".to_string(),
                tag: "FOO".to_string(),
            }),
            ..create_test_profile()
        };

        let output = format_player_profile(&profile, now());

        assert!(output.ends_with("VTC ID: 7\nVTC 名称: Foo\nVTC 标签: FOO"));
        assert!(!output.contains("此玩家未加入 VTC"));
    }

    #[test]
    fn test_format_player_profile_unparsable_join_date() {
        let profile = PlayerProfile {
            join_date: "yesterday".to_string(),
            ..create_test_profile()
        };

        let output = format_player_profile(&profile, now());

        assert!(output.contains("加入天数: 未知\n"));
    }

    #[test]
    fn test_format_player_profile_admin() {
        let profile = PlayerProfile {
            is_game_admin: true,
            ..create_test_profile()
        };

        assert!(format_player_profile(&profile, now()).contains("是否管理员: 是"));
    }

    #[test]
    fn test_format_player_not_found() {
        assert!(format_player_not_found("Ghost").contains("Ghost"));
    }

    #[test]
    fn test_format_successful_bind() {
        assert_eq!(format_successful_bind("Alice"), "已将玩家Alice绑定到您的账号");
    }
}
