// Session tests against the scripted mock server

#[cfg(test)]
mod tests {
    use crate::core_ftpclient::mock_server::{
        EpsvReply, MockBehavior, MockFtpServer, MOCK_PASSWORD,
    };
    use crate::core_ftpclient::{
        ConnectionConfig, FtpErrorKind, FtpJob, FtpTimeouts, FtpUploadService, TransferRequest,
    };
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn service() -> FtpUploadService {
        FtpUploadService::new(FtpTimeouts {
            connect: Duration::from_secs(5),
            reply: Duration::from_secs(5),
            quit: Duration::from_secs(1),
        })
    }

    fn order_file(payload: &[u8]) -> TransferRequest {
        TransferRequest {
            filename: "pedido_000123.xml".to_string(),
            payload: payload.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_test_mode_sends_only_login_and_cwd() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        let message = service().execute(&config, None).await.unwrap();

        assert_eq!(message, "Conexão estabelecida com 127.0.0.1");
        assert_eq!(server.commands(), vec!["USER", "PASS", "CWD", "QUIT"]);
    }

    #[tokio::test]
    async fn test_upload_stores_identical_bytes() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");
        let payload = "<pedido numero=\"000123\"><item>café</item></pedido>\n".as_bytes();

        let message = service()
            .execute(&config, Some(&order_file(payload)))
            .await
            .unwrap();

        assert_eq!(message, "pedido_000123.xml enviado para 127.0.0.1/pedidos");
        assert_eq!(
            server.stored("/pedidos/pedido_000123.xml").as_deref(),
            Some(payload)
        );
        assert_eq!(
            server.commands(),
            vec!["USER", "PASS", "CWD", "TYPE", "EPSV", "STOR", "QUIT"]
        );
    }

    #[tokio::test]
    async fn test_bad_credentials_stop_before_cwd() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let config = server.config("errada", "/pedidos");

        let err = service()
            .execute(&config, Some(&order_file(b"x")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::AuthenticationFailure);
        assert!(err.to_string().starts_with("Login falhou"));
        let commands = server.commands();
        assert!(!commands.iter().any(|c| c == "CWD" || c == "STOR"));
        assert!(server.wait_closed(1).await);
    }

    #[tokio::test]
    async fn test_missing_folder_closes_control_connection() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let config = server.config(MOCK_PASSWORD, "/nao_existe");

        let err = service().execute(&config, None).await.unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::DirectoryFailure);
        assert!(err.to_string().contains("/nao_existe"));
        assert!(server.wait_closed(1).await);
        assert_eq!(server.commands(), vec!["USER", "PASS", "CWD", "QUIT"]);
    }

    #[tokio::test]
    async fn test_pasv_fallback_uses_control_host() {
        let server = MockFtpServer::start(MockBehavior {
            epsv: EpsvReply::Refused,
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        service()
            .execute(&config, Some(&order_file(b"<pedido/>")))
            .await
            .unwrap();

        assert_eq!(
            server.stored("/pedidos/pedido_000123.xml").as_deref(),
            Some(&b"<pedido/>"[..])
        );
        assert!(server.commands().contains(&"PASV".to_string()));
    }

    #[tokio::test]
    async fn test_malformed_epsv_falls_back_to_pasv() {
        let server = MockFtpServer::start(MockBehavior {
            epsv: EpsvReply::Malformed,
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        service()
            .execute(&config, Some(&order_file(b"abc")))
            .await
            .unwrap();

        assert_eq!(
            server.commands(),
            vec!["USER", "PASS", "CWD", "TYPE", "EPSV", "PASV", "STOR", "QUIT"]
        );
    }

    #[tokio::test]
    async fn test_no_passive_mode_fails_negotiation() {
        let server = MockFtpServer::start(MockBehavior {
            epsv: EpsvReply::Refused,
            pasv_enabled: false,
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        let err = service()
            .execute(&config, Some(&order_file(b"abc")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::PassiveNegotiationFailure);
        assert!(!server.commands().contains(&"STOR".to_string()));
        assert!(server.wait_closed(1).await);
    }

    #[tokio::test]
    async fn test_test_mode_is_idempotent() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let good = server.config(MOCK_PASSWORD, "/pedidos");
        let bad = server.config("errada", "/pedidos");
        let service = service();

        for _ in 0..3 {
            assert!(service.execute(&good, None).await.is_ok());
            let err = service.execute(&bad, None).await.unwrap_err();
            assert_eq!(err.kind(), FtpErrorKind::AuthenticationFailure);
        }
        assert!(server.wait_closed(6).await);
    }

    #[tokio::test]
    async fn test_zero_byte_upload() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        service()
            .execute(&config, Some(&order_file(b"")))
            .await
            .unwrap();

        assert_eq!(
            server.stored("/pedidos/pedido_000123.xml"),
            Some(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_root_folder_skips_cwd() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let config = server.config(MOCK_PASSWORD, "/");

        let message = service()
            .execute(&config, Some(&order_file(b"raiz")))
            .await
            .unwrap();

        assert_eq!(message, "pedido_000123.xml enviado para 127.0.0.1/");
        assert!(!server.commands().contains(&"CWD".to_string()));
        assert_eq!(
            server.stored("/pedido_000123.xml").as_deref(),
            Some(&b"raiz"[..])
        );
    }

    #[tokio::test]
    async fn test_refused_stor_closes_both_channels() {
        let server = MockFtpServer::start(MockBehavior {
            stor_code: 553,
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        let err = service()
            .execute(&config, Some(&order_file(b"abc")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::TransferInitiationFailure);
        assert!(err.to_string().contains("pedido_000123.xml"));
        assert!(server.wait_closed(1).await);
        assert_eq!(server.stored("/pedidos/pedido_000123.xml"), None);
    }

    #[tokio::test]
    async fn test_upload_tolerates_125_refused_type_and_late_error() {
        let server = MockFtpServer::start(MockBehavior {
            type_code: 504,
            stor_code: 125,
            complete_code: 451,
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/");
        let transfer = TransferRequest {
            filename: "a.txt".to_string(),
            payload: b"xyz".to_vec(),
        };

        let message = service().execute(&config, Some(&transfer)).await.unwrap();

        assert_eq!(message, "a.txt enviado para 127.0.0.1/");
        assert_eq!(server.stored("/a.txt").as_deref(), Some(&b"xyz"[..]));
        assert_eq!(
            server.commands(),
            vec!["USER", "PASS", "TYPE", "EPSV", "STOR", "QUIT"]
        );
    }

    #[tokio::test]
    async fn test_dead_data_port_is_data_connection_failure() {
        let server = MockFtpServer::start(MockBehavior {
            epsv: EpsvReply::DeadPort,
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        let err = service()
            .execute(&config, Some(&order_file(b"abc")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::DataConnectionFailure);
        assert!(server.wait_closed(1).await);
        assert_eq!(
            server.commands(),
            vec!["USER", "PASS", "CWD", "TYPE", "EPSV", "QUIT"]
        );
    }

    #[tokio::test]
    async fn test_refusing_greeting_is_service_unavailable() {
        let server = MockFtpServer::start(MockBehavior {
            greeting: "421 Too many connections.\r\n",
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        let err = service().execute(&config, None).await.unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::ServiceUnavailable);
        assert!(!server.commands().contains(&"USER".to_string()));
    }

    #[tokio::test]
    async fn test_multi_line_greeting() {
        let server = MockFtpServer::start(MockBehavior {
            greeting: "220-Bem-vindo ao servidor de pedidos\r\n220-Uso restrito\r\n220 Pronto\r\n",
            ..MockBehavior::default()
        })
        .await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");

        assert!(service().execute(&config, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ConnectionConfig {
            host: "127.0.0.1".to_string(),
            port,
            user: "loja".to_string(),
            password: String::new(),
            remote_folder: "/".to_string(),
        };
        let err = service().execute(&config, None).await.unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::ConnectionFailure);
    }

    #[tokio::test]
    async fn test_silent_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let holder = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let config = ConnectionConfig {
            host: "127.0.0.1".to_string(),
            port,
            user: "loja".to_string(),
            password: String::new(),
            remote_folder: "/".to_string(),
        };
        let service = FtpUploadService::new(FtpTimeouts {
            connect: Duration::from_secs(5),
            reply: Duration::from_millis(200),
            quit: Duration::from_millis(100),
        });
        let err = service.execute(&config, None).await.unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::TransportError);
        holder.abort();
    }

    #[tokio::test]
    async fn test_invalid_filename_rejected_before_connecting() {
        let config = ConnectionConfig {
            host: "127.0.0.1".to_string(),
            port: 21,
            user: "loja".to_string(),
            password: String::new(),
            remote_folder: "/".to_string(),
        };
        let transfer = TransferRequest {
            filename: "../pedido.xml".to_string(),
            payload: Vec::new(),
        };

        let err = service()
            .execute(&config, Some(&transfer))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FtpErrorKind::InvalidRequest);
    }

    #[tokio::test]
    async fn test_concurrent_uploads_are_independent() {
        let server = MockFtpServer::start(MockBehavior::default()).await;
        let config = server.config(MOCK_PASSWORD, "/pedidos");
        let first = FtpJob::Upload(
            config.clone(),
            TransferRequest {
                filename: "pedido_1.txt".to_string(),
                payload: b"um".to_vec(),
            },
        );
        let second = FtpJob::Upload(
            config,
            TransferRequest {
                filename: "pedido_2.txt".to_string(),
                payload: b"dois".to_vec(),
            },
        );
        let service = service();

        let (a, b) = tokio::join!(service.run(&first), service.run(&second));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(server.stored("/pedidos/pedido_1.txt").as_deref(), Some(&b"um"[..]));
        assert_eq!(server.stored("/pedidos/pedido_2.txt").as_deref(), Some(&b"dois"[..]));
    }
}
