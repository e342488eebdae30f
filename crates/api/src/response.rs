use serde::Serialize;

/// Body of every resource endpoint: `{ "data": ... }`.
///
/// Token responses from `/auth/*` and `/health` are not wrapped.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
