use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::api::templates::render_transform;
use crate::companies::{
    process_uploads, upload::{COMPANIES_FIELD, DAILY_FIELD}, write_export_csv, CompanyUploads,
    TransformOptions, UploadedFile, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME,
};

/// 上傳表單所在路徑，轉換失敗時導回此處
pub const FORM_PATH: &str = "/companies/";

/// 顯示上傳表單，並取出一次性的提示訊息
pub async fn form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let flash = state.flash.read(&headers);
    let page = Html(render_transform(flash.as_deref()));

    if flash.is_some() {
        ([(header::SET_COOKIE, state.flash.clear_cookie())], page).into_response()
    } else {
        page.into_response()
    }
}

/// 收集 multipart 表單中的檔案與參數
async fn read_form(mut multipart: Multipart) -> ApiResult<(CompanyUploads, TransformOptions)> {
    let mut uploads = CompanyUploads::default();
    let mut options = TransformOptions::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            COMPANIES_FIELD | DAILY_FIELD => {
                let file = UploadedFile {
                    file_name: field.file_name().map(str::to_string),
                    content_type: field.content_type().map(str::to_string),
                    data: field.bytes().await?.to_vec(),
                };
                debug!("收到上傳檔案 {}: {:?} ({} bytes)", name, file.file_name, file.data.len());

                if name == COMPANIES_FIELD {
                    uploads.companies = Some(file);
                } else {
                    uploads.daily = Some(file);
                }
            }
            "start_date" => options.start_date = Some(field.text().await?),
            "end_date" => options.end_date = Some(field.text().await?),
            "n" => options.n = Some(field.text().await?),
            _ => debug!("忽略未知表單欄位: {}", name),
        }
    }

    Ok((uploads, options))
}

fn redirect_with_flash(state: &AppState, message: &str) -> Response {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, HeaderValue::from_static(FORM_PATH)),
            (header::SET_COOKIE, state.flash.set_cookie(message)),
        ],
    )
        .into_response()
}

fn csv_download(body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename={}", EXPORT_FILE_NAME);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, EXPORT_CONTENT_TYPE)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// 合併上傳的 companies/daily 檔案，成功時下載 CSV，失敗時導回表單
pub async fn merge_upload(State(state): State<AppState>, multipart: Multipart) -> ApiResult<Response> {
    let (uploads, options) = read_form(multipart).await?;
    let reader = state.csv_reader.clone();

    // 轉換為 CPU 密集工作，移出非同步執行緒
    let export = tokio::task::spawn_blocking(move || {
        process_uploads(&uploads, &options, &reader)
            .into_result()
            .and_then(|table| write_export_csv(&table).map_err(|e| e.to_string()))
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))?;

    match export {
        Ok(body) => {
            info!("合併完成，輸出 {} bytes", body.len());
            Ok(csv_download(body))
        }
        Err(message) => {
            warn!("合併失敗: {}", message);
            Ok(redirect_with_flash(&state, &message))
        }
    }
}
