use crate::dns::encoder::encode_answers;
use fabric_dns_application::use_cases::{Resolution, ResolveQueryUseCase};
use fabric_dns_domain::{Fqdn, QueryType};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record as WireRecord;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Serves the configured zones and hands everything else to `next`. The
/// chain ends at [`Refuse`] unless a forwarding handler is installed.
pub struct DnsServerHandler<N: RequestHandler> {
    use_case: Arc<ResolveQueryUseCase>,
    next: N,
}

impl<N: RequestHandler> DnsServerHandler<N> {
    pub fn new(use_case: Arc<ResolveQueryUseCase>, next: N) -> Self {
        Self { use_case, next }
    }
}

#[async_trait::async_trait]
impl<N: RequestHandler> RequestHandler for DnsServerHandler<N> {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_empty_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let name = Fqdn::from_name(&query.name().to_utf8());
        let qtype = QueryType::from_u16(u16::from(query.query_type()));
        let client_ip = request.src().ip();

        debug!(name = %name, qtype = %qtype, client = %client_ip, "DNS query received");

        let resolution = match self.use_case.execute(&name, qtype).await {
            Ok(resolution) => resolution,
            Err(e) => {
                error!(name = %name, error = %e, "Query resolution failed");
                return send_empty_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        match resolution {
            Resolution::Delegate => self.next.handle_request(request, response_handle).await,
            Resolution::NoData => {
                debug!(name = %name, "No records of requested type (NODATA)");
                send_empty_response(request, &mut response_handle, ResponseCode::NoError).await
            }
            Resolution::NxDomain => {
                debug!(name = %name, "Name does not exist (NXDOMAIN)");
                send_empty_response(request, &mut response_handle, ResponseCode::NXDomain).await
            }
            Resolution::Answer(records) => {
                let answers = match encode_answers(&records) {
                    Ok(answers) => answers,
                    Err(e) => {
                        error!(name = %name, error = %e, "Failed to encode answer records");
                        return send_empty_response(
                            request,
                            &mut response_handle,
                            ResponseCode::ServFail,
                        )
                        .await;
                    }
                };

                debug!(name = %name, answers = answers.len(), "Sending response");

                let builder = MessageResponseBuilder::from_message_request(request);
                let header = response_header(request, ResponseCode::NoError);
                let response = builder.build(header, answers.iter(), &[], &[], &[]);

                match response_handle.send_response(response).await {
                    Ok(info) => info,
                    Err(e) => {
                        error!(error = %e, "Failed to send response");
                        ResponseInfo::from(*request.header())
                    }
                }
            }
        }
    }
}

/// Terminal handler: refuses anything no earlier handler claimed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Refuse;

#[async_trait::async_trait]
impl RequestHandler for Refuse {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if let Ok(info) = request.request_info() {
            warn!(name = %info.query.name(), "Query outside configured zones refused");
        }
        send_empty_response(request, &mut response_handle, ResponseCode::Refused).await
    }
}

fn response_header(request: &Request, code: ResponseCode) -> hickory_proto::op::Header {
    let mut header = *request.header();
    header.set_authoritative(true);
    header.set_recursion_available(false);
    header.set_response_code(code);
    header
}

async fn send_empty_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    let builder = MessageResponseBuilder::from_message_request(request);
    let header = response_header(request, code);
    let response = builder.build(header, &[] as &[WireRecord], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, code = ?code, "Failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}
