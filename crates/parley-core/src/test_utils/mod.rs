pub mod mock_webhook_server;
