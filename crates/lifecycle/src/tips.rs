//! Rotating marketing tips shown while a campaign is in `PROCESSING` or
//! `REFINING`. State is owned by the consuming view, not a process-wide
//! singleton.

use rand::Rng;

pub const MARKETING_TIPS: [&str; 10] = [
    "메시지에 고객의 이름을 넣어 개인화를 시도해보세요. '[이름]님'이 '고객님'보다 훨씬 높은 반응을 이끌어낼 수 있습니다.",
    "긴급성을 부여하는 문구를 사용해보세요. '기간 한정', '오늘만 이 가격'과 같은 표현은 클릭률을 높이는 데 효과적입니다.",
    "숫자를 활용하여 구체적인 혜택을 강조하세요. '큰 할인'보다는 '전 품목 20% 할인'이 더 명확하고 설득력 있습니다.",
    "고객에게 질문을 던지는 메시지는 참여를 유도하고 생각할 거리를 제공합니다. '새로운 시즌, 어떤 스타일을 찾고 계신가요?'",
    "메시지 전송 시간도 중요한 요소입니다. 타겟 고객이 가장 활발하게 활동하는 시간대를 고려하여 발송해보세요.",
    "A/B 테스트는 선택이 아닌 필수입니다. 두 가지 다른 메시지 시안 중 어떤 것이 더 나은 성과를 보이는지 항상 확인하세요.",
    "이모티콘(😊)이나 특수문자(★)를 적절히 사용하면 메시지에 생동감을 더하고 주목도를 높일 수 있습니다.",
    "CTA(Call To Action) 버튼의 문구를 명확하게 작성하세요. '더 알아보기'나 '지금 혜택 받기'처럼 고객이 무엇을 해야 할지 정확히 알려주세요.",
    "고객의 과거 구매 데이터를 활용하면 더욱 개인화된 메시지를 만들 수 있습니다. '[관심 카테고리] 신상품을 확인해보세요!'",
    "메시지와 함께 매력적인 이미지를 사용하는 것은 고객의 시선을 사로잡는 가장 확실한 방법 중 하나입니다.",
];

/// Picks a random tip per call. Each consumer owns its own rotator.
#[derive(Debug, Default)]
pub struct TipRotator;

impl TipRotator {
    pub fn new() -> Self {
        Self
    }

    pub fn random_tip(&self) -> &'static str {
        let index = rand::thread_rng().gen_range(0..MARKETING_TIPS.len());
        MARKETING_TIPS[index]
    }
}
