//! Server status command handler.
//!
//! Fetches the live state of every TruckersMP server on each call, nothing is cached.

use log::{debug, error};

use crate::{
    commands::{
        CommandResult,
        text_response::{format_server_status, format_status_error},
    },
    truckersmp::{Requester, ServerStatusReporter},
};

/// Reports the status of every server.
///
/// A failing request is logged and answered with a generic retry message.
pub async fn handle_status<R: Requester>(status_reporter: &ServerStatusReporter<R>) -> CommandResult {
    debug!("handling server status command");

    let response = match status_reporter.report().await {
        Ok(servers) => format_server_status(&servers),
        Err(e) => {
            error!("failed to fetch server status: {}", e);
            format_status_error()
        }
    };

    CommandResult::text(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::truckersmp::{MockRequester, RequestError, ServerResponse};

    fn create_server_response(name: &str, players: u32, queue: u32) -> ServerResponse {
        ServerResponse {
            name: name.to_string(),
            players,
            maxplayers: 4200,
            queue,
            speedlimiter: false,
            collisions: true,
        }
    }

    #[tokio::test]
    async fn test_handle_status() {
        let mut mock_requester = MockRequester::new();
        mock_requester.expect_get_servers().times(1).returning(|| {
            Ok(vec![
                create_server_response("Simulation 1", 4100, 57),
                create_server_response("Promods", 800, 0),
            ])
        });
        let status_reporter = ServerStatusReporter::new(mock_requester);

        let result = handle_status(&status_reporter).await;

        assert!(result.image.is_none());
        assert!(result.response.contains("服务器名称: Simulation 1\n当前玩家人数: 4100/4200，等待人数: 57"));
        assert!(result.response.contains("服务器名称: Promods\n当前玩家人数: 800/4200，等待人数: 0"));
        assert!(result.response.contains("是否限速: 否，是否碰撞: 是"));
    }

    #[tokio::test]
    async fn test_handle_status_api_error() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_servers()
            .times(1)
            .returning(|| Err(RequestError::Status(503)));
        let status_reporter = ServerStatusReporter::new(mock_requester);

        let result = handle_status(&status_reporter).await;

        assert_eq!(result.response, format_status_error());
    }
}
