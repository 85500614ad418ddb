// Minimal client for the Twilio Programmable Messaging API.
// https://www.twilio.com/docs/messaging/api/message-resource

use std::collections::HashMap;

pub mod models;
use reqwest::{header, Client};

use crate::models::MessageResponse;

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number in E.164 format, e.g. "+15017122661".
    pub from_number: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self { options }
    }

    /// Send an SMS with the given body to a single recipient.
    pub async fn send_sms(
        &self,
        recipient: &str,
        body: &str,
    ) -> Result<MessageResponse, &'static str> {
        let account_sid = self.options.account_sid.clone();
        let auth_token = self.options.auth_token.clone();

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{sid}/Messages.json",
            sid = account_sid
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "Content-Type",
            "application/x-www-form-urlencoded"
                .parse()
                .expect("Header value should parse correctly"),
        );

        let mut form_body: HashMap<&str, String> = HashMap::new();
        form_body.insert("To", recipient.to_string());
        form_body.insert("From", self.options.from_number.clone());
        form_body.insert("Body", body.to_string());

        let client = Client::new();
        let res = client
            .post(url)
            .basic_auth(account_sid, Some(auth_token))
            .headers(headers)
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    // Log the error response from Twilio
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Twilio error ({}): {}", status, error_body);
                    return Err("Twilio returned an error");
                }

                let result = response.json::<MessageResponse>().await;
                match result {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        eprintln!("Failed to parse Twilio response: {}", e);
                        Err("Error parsing message response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Twilio failed: {}", e);
                Err("Error sending SMS")
            }
        }
    }
}
