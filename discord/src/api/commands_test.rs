#[cfg(test)]
mod tests {
    use crate::api::commands::{CommandsApi, CreateCommand, PatchCommand};
    use crate::api::error::ApiError;
    use crate::api::test_helpers::{command_body, test_service};
    use mockito::{Matcher, Server};
    use tfkit::context::Context;

    #[tokio::test]
    async fn list_decodes_command_array() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v10/applications/123/commands")
            .match_header("authorization", "Bot test-token")
            .with_body(format!("[{}]", command_body("456", "123", "greet", "Say hello")))
            .create_async()
            .await;

        let service = test_service(&server.url());
        let response = service.list(&Context::new(), "123").await.unwrap();

        assert_eq!(response.status, 200);
        let commands = response.value.unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].id, "456");
        assert_eq!(commands[0].name, "greet");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_decodes_single_command() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v10/applications/123/commands/456")
            .match_header("authorization", "Bot test-token")
            .with_body(command_body("456", "123", "greet", "Say hello"))
            .create_async()
            .await;

        let service = test_service(&server.url());
        let response = service.get(&Context::new(), "123", "456").await.unwrap();

        assert_eq!(response.status, 200);
        let command = response.value.unwrap();
        assert_eq!(command.id, "456");
        assert_eq!(command.application_id, "123");
        assert_eq!(command.command_type, 1);
        assert_eq!(command.description, "Say hello");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_missing_command_reports_status_without_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v10/applications/123/commands/999")
            .with_status(404)
            .with_body(r#"{"message":"Unknown application command","code":10063}"#)
            .create_async()
            .await;

        let service = test_service(&server.url());
        let response = service.get(&Context::new(), "123", "999").await.unwrap();

        assert_eq!(response.status, 404);
        assert!(response.value.is_none());
    }

    #[tokio::test]
    async fn create_posts_json_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v10/applications/123/commands")
            .match_header("authorization", "Bot test-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "name": "greet",
                "description": "Say hello",
                "type": 1,
                "dm_permission": false,
                "nsfw": false
            })))
            .with_status(201)
            .with_body(command_body("456", "123", "greet", "Say hello"))
            .create_async()
            .await;

        let service = test_service(&server.url());
        let request = CreateCommand {
            name: "greet".to_string(),
            description: "Say hello".to_string(),
            command_type: Some(1),
            ..Default::default()
        };
        let response = service
            .create(&Context::new(), "123", &request)
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.value.unwrap().id, "456");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_on_server_error_reports_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v10/applications/123/commands")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let service = test_service(&server.url());
        let request = CreateCommand {
            name: "greet".to_string(),
            description: "Say hello".to_string(),
            ..Default::default()
        };
        let response = service
            .create(&Context::new(), "123", &request)
            .await
            .unwrap();

        assert_eq!(response.status, 500);
        assert!(response.value.is_none());
    }

    #[tokio::test]
    async fn patch_omits_absent_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/v10/applications/123/commands/456")
            .match_body(Matcher::JsonString(
                r#"{"description":"Wave instead"}"#.to_string(),
            ))
            .with_body(command_body("456", "123", "greet", "Wave instead"))
            .create_async()
            .await;

        let service = test_service(&server.url());
        let request = PatchCommand {
            description: Some("Wave instead".to_string()),
            ..Default::default()
        };
        let response = service
            .patch(&Context::new(), "123", "456", &request)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.value.unwrap().description, "Wave instead");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_returns_raw_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v10/applications/123/commands/456")
            .match_header("authorization", "Bot test-token")
            .with_status(204)
            .create_async()
            .await;

        let service = test_service(&server.url());
        let status = service.delete(&Context::new(), "123", "456").await.unwrap();

        assert_eq!(status, 204);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn undecodable_success_body_is_a_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v10/applications/123/commands/456")
            .with_body("not json")
            .create_async()
            .await;

        let service = test_service(&server.url());
        let err = service.get(&Context::new(), "123", "456").await.unwrap_err();

        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        // Port 1 is reserved and unbound.
        let service = test_service("http://127.0.0.1:1");

        let err = service.list(&Context::new(), "123").await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }

    #[tokio::test]
    async fn command_decode_defaults_missing_type() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v10/applications/123/commands/456")
            .with_body(r#"{"id":"456","name":"greet","description":"Say hello"}"#)
            .create_async()
            .await;

        let service = test_service(&server.url());
        let response = service.get(&Context::new(), "123", "456").await.unwrap();

        let command = response.value.unwrap();
        assert_eq!(command.command_type, 1);
        assert!(!command.nsfw);
        assert!(command.version.is_empty());
    }
}
