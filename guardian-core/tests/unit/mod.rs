mod domain_retry;
mod domain_vaa;
mod observation_state;
mod wire_encoding;
