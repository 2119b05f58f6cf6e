use anyhow::Context;
use ferrous_relay_application::use_cases::HandleDnsQueryUseCase;
use ferrous_relay_domain::Config;
use ferrous_relay_infrastructure::dns::{DnsCache, DnsServerHandler, UdpUpstreamForwarder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config, cache: Arc<DnsCache>) -> anyhow::Result<Self> {
        let upstream = Self::connect_upstream(config).await?;

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(cache, upstream));
        let handler = DnsServerHandler::new(handler_use_case);

        Ok(Self { handler })
    }

    async fn connect_upstream(config: &Config) -> anyhow::Result<Arc<UdpUpstreamForwarder>> {
        let server = config
            .upstream
            .socket_addr()
            .with_context(|| format!("Invalid upstream address: {}", config.upstream.address))?;

        let forwarder = UdpUpstreamForwarder::connect(
            server,
            config.upstream.timeout(),
            config.server.recv_buffer_size,
        )
        .await
        .with_context(|| format!("Failed to connect to upstream {}", server))?;

        info!(
            upstream = %forwarder.server_addr(),
            timeout_ms = config.upstream.timeout_ms,
            "Upstream forwarder ready"
        );

        Ok(Arc::new(forwarder))
    }
}
