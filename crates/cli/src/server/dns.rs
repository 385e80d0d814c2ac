use hickory_server::server::RequestHandler;
use hickory_server::ServerFuture;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::info;

const TCP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Binds UDP and TCP on the same address and serves until the shutdown
/// token fires.
pub async fn start_dns_server<H: RequestHandler>(
    bind_addr: String,
    handler: H,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;

    let udp_socket = UdpSocket::bind(socket_addr).await?;
    let tcp_listener = TcpListener::bind(socket_addr).await?;

    let mut server = ServerFuture::new(handler);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, TCP_REQUEST_TIMEOUT);

    info!(bind_address = %socket_addr, "DNS server ready (udp+tcp)");

    tokio::select! {
        result = server.block_until_done() => {
            result?;
        }
        _ = shutdown.cancelled() => {
            info!("DNS server shutting down");
            server.shutdown_gracefully().await?;
        }
    }

    Ok(())
}
