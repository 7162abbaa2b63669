pub mod discovery_poller;
