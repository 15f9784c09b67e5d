pub mod web_rpc;
