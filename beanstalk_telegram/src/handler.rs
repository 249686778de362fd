use crate::format::{card_html, text_html};
use crate::{Command, Error, Result, TelegramBot};
use beanstalk_core::{Media, Reply};
use chrono::Utc;
use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::requests::Requester;
use teloxide::types::{ChatId, InputFile, LinkPreviewOptions, Message, ParseMode};
use tracing::{info, warn};

/// Handle bot commands
pub async fn handle_command(bot: &TelegramBot, msg: &Message, cmd: Command) -> Result<()> {
    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    match cmd {
        Command::Start => {
            info!("[@{username}] Command: start");
            bot.bot
                .send_message(msg.chat.id, Command::welcome_text())
                .await?;
        }
        Command::Help => {
            info!("[@{username}] Command: help");
            bot.bot
                .send_message(msg.chat.id, Command::help_text())
                .await?;
        }
        Command::Refresh => {
            info!("[@{username}] Command: refresh");
            let reply = bot.dispatcher.refresh(Utc::now()).await;
            send_reply(bot, msg.chat.id, &reply).await?;
        }
    }

    Ok(())
}

/// Handle any message (commands or card queries)
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let from_self = bot.is_own(&msg);

    if !from_self {
        if let Some(cmd) = Command::parse_from_text(text, &bot.command_prefix, bot.username()) {
            return handle_command(&bot, &msg, cmd).await;
        }
    }

    let replies = bot.dispatcher.answer(text, from_self);
    if replies.is_empty() {
        return Ok(());
    }

    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");
    info!("[@{username}] {} replies for: {text}", replies.len());

    // One failed send must not stop the others.
    for reply in &replies {
        if let Err(e) = send_reply(&bot, msg.chat.id, reply).await {
            warn!("[@{username}] Failed to send reply: {e}");
        }
    }

    Ok(())
}

async fn send_reply(bot: &TelegramBot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    match reply {
        Reply::Text(text) => {
            bot.bot
                .send_message(chat_id, text_html(text))
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Reply::Card(display) => match &display.media {
            Media::Image(image) => {
                let url = reqwest::Url::parse(image).map_err(|e| Error::InvalidUrl {
                    url: image.clone(),
                    reason: e.to_string(),
                })?;
                bot.bot
                    .send_photo(chat_id, InputFile::url(url))
                    .caption(card_html(display))
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            Media::Thumbnail(thumbnail) => {
                bot.bot
                    .send_message(chat_id, card_html(display))
                    .parse_mode(ParseMode::Html)
                    .link_preview_options(LinkPreviewOptions {
                        is_disabled: false,
                        url: Some(thumbnail.clone()),
                        prefer_small_media: true,
                        prefer_large_media: false,
                        show_above_text: false,
                    })
                    .await?;
            }
        },
    }

    Ok(())
}
